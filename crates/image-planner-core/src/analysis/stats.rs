use crate::error::{Error, Result};
use crate::model::{PlanItem, Percentage};

/// Point count and average completion of a group of plan items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupStats {
    pub points: usize,
    /// Average completion ratio in `[0, 1]`.
    pub average: f64,
}

impl GroupStats {
    pub fn percentage(&self) -> Percentage {
        Percentage::from_ratio(self.average)
    }
}

/// Count the items matching `predicate` and average their completion.
///
/// An empty group has no average; asking for one is a bug in the caller and
/// fails with [`Error::EmptyGroup`] naming `group`.
pub fn aggregate<F>(items: &[PlanItem], group: &str, predicate: F) -> Result<GroupStats>
where
    F: Fn(&PlanItem) -> bool,
{
    let mut points = 0usize;
    let mut percents = 0.0f64;
    for item in items {
        if !predicate(item) {
            continue;
        }
        points += 1;
        percents += item.completion.sum();
    }

    if points == 0 {
        return Err(Error::EmptyGroup(group.to_string()));
    }

    Ok(GroupStats {
        points,
        average: percents / points as f64 / 4.0,
    })
}

pub fn global_stats(items: &[PlanItem]) -> Result<GroupStats> {
    aggregate(items, "<all>", |_| true)
}

pub fn module_stats(items: &[PlanItem], module: &str) -> Result<GroupStats> {
    aggregate(items, module, |item| item.main_module == module)
}

pub fn sub_module_stats(items: &[PlanItem], module: &str, sub_module: &str) -> Result<GroupStats> {
    aggregate(items, &format!("{}.{}", module, sub_module), |item| {
        item.main_module == module && item.sub_module == sub_module
    })
}
