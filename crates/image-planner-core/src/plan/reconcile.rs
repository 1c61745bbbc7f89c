use crate::model::PlanItem;
use ahash::{AHashMap, AHashSet};

/// Outcome of merging freshly parsed items with previously recorded ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Current items, with recorded completion carried over where the file name matches.
    pub merged: Vec<PlanItem>,
    /// Recorded items whose image no longer exists.
    pub lost: Vec<PlanItem>,
}

/// Carry completion from `prior` onto `current`, matching file names case-insensitively.
///
/// When `prior` holds the same name twice, the first row wins.
pub fn reconcile(current: Vec<PlanItem>, prior: &[PlanItem]) -> Reconciliation {
    let mut recorded: AHashMap<String, &PlanItem> = AHashMap::with_capacity(prior.len());
    for item in prior {
        recorded.entry(item.identity()).or_insert(item);
    }

    let present: AHashSet<String> = current.iter().map(PlanItem::identity).collect();

    let merged = current
        .into_iter()
        .map(|item| match recorded.get(&item.identity()) {
            Some(data) => item.with_completion(data.completion),
            None => item,
        })
        .collect();

    let lost = prior
        .iter()
        .filter(|item| !present.contains(&item.identity()))
        .cloned()
        .collect();

    Reconciliation { merged, lost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Completion;
    use crate::plan::parse_file_name;
    use pretty_assertions::assert_eq;

    fn item(name: &str) -> PlanItem {
        parse_file_name(name).unwrap()
    }

    fn recorded(name: &str, completion: Completion) -> PlanItem {
        item(name).with_completion(completion)
    }

    #[test]
    fn test_copies_completion_case_insensitively() {
        let current = vec![item("1-Mod-A.png")];
        let prior = vec![recorded("1-mod-a.PNG", Completion::new(1.0, 0.5, 0.25, 0.0))];

        let result = reconcile(current, &prior);

        assert_eq!(result.merged.len(), 1);
        let merged = &result.merged[0];
        assert_eq!(merged.file_name, "1-Mod-A.png");
        assert_eq!(merged.main_module, "Mod");
        assert_eq!(merged.task_name, "A");
        assert_eq!(merged.completion, Completion::new(1.0, 0.5, 0.25, 0.0));
        assert!(result.lost.is_empty());
    }

    #[test]
    fn test_hierarchy_comes_from_current_item() {
        let current = vec![item("1-New.Sub-Task.png")];
        let mut old = recorded("1-New.Sub-Task.png", Completion::new(0.5, 0.5, 0.5, 0.5));
        old.main_module = "Old".to_string();
        old.sub_module = "Old".to_string();

        let result = reconcile(current, &[old]);

        assert_eq!(result.merged[0].main_module, "New");
        assert_eq!(result.merged[0].sub_module, "Sub");
        assert_eq!(result.merged[0].percent(), 0.5);
    }

    #[test]
    fn test_unmatched_current_keeps_zero_completion() {
        let result = reconcile(vec![item("1-Mod-A.png")], &[]);
        assert_eq!(result.merged[0].completion, Completion::default());
        assert!(result.lost.is_empty());
    }

    #[test]
    fn test_detects_lost_items() {
        let current = vec![item("1-Mod-X.png")];
        let prior = vec![
            recorded("1-Mod-X.png", Completion::new(1.0, 1.0, 1.0, 1.0)),
            recorded("2-Mod-Y.png", Completion::new(0.5, 0.0, 0.0, 0.0)),
        ];

        let result = reconcile(current, &prior);

        assert_eq!(result.lost.len(), 1);
        assert_eq!(result.lost[0].file_name, "2-Mod-Y.png");
        assert_eq!(result.lost[0].completion, Completion::new(0.5, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_first_recorded_duplicate_wins() {
        let prior = vec![
            recorded("1-Mod-A.png", Completion::new(0.1, 0.0, 0.0, 0.0)),
            recorded("1-MOD-A.png", Completion::new(0.9, 0.0, 0.0, 0.0)),
        ];

        let result = reconcile(vec![item("1-Mod-A.png")], &prior);

        assert_eq!(result.merged[0].completion.ui, 0.1);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let prior = vec![recorded("1-Mod-A.png", Completion::new(0.3, 0.6, 0.9, 0.0))];
        let current = vec![item("1-Mod-A.png"), item("2-Mod-B.png")];

        let once = reconcile(current, &prior);
        let twice = reconcile(once.merged.clone(), &prior);

        assert_eq!(once, twice);
    }
}
