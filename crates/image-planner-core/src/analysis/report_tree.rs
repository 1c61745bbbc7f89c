use super::stats::{self, GroupStats};
use crate::error::Result;
use crate::model::{NodeType, Percentage, PlanItem, ReportItem};
use chrono::{DateTime, Local};
use tracing::debug;

/// Flattened report tree plus the global summary shown above it.
#[derive(Debug, Clone)]
pub struct Report {
    pub items: Vec<ReportItem>,
    pub points: usize,
    pub percentage: Percentage,
    pub generated_at: DateTime<Local>,
}

/// Build the report tree and global statistics for `items`.
///
/// An empty plan yields an empty tree with zero points and `0.00` percent.
pub fn build_report(items: &[PlanItem], image_url_prefix: &str) -> Result<Report> {
    let tree = build_report_tree(items, image_url_prefix)?;
    let global = if items.is_empty() {
        GroupStats::default()
    } else {
        stats::global_stats(items)?
    };

    Ok(Report {
        items: tree,
        points: global.points,
        percentage: global.percentage(),
        generated_at: Local::now(),
    })
}

/// Walk `items` in the given order and emit module, sub-module and task nodes.
///
/// A new module node starts whenever the main module changes from the previous
/// item, and a new sub-module node whenever the sub-module changes within a
/// module. Items are not re-sorted: a module that reappears after another one
/// gets a second node, although its statistics still cover the whole module.
pub fn build_report_tree(items: &[PlanItem], image_url_prefix: &str) -> Result<Vec<ReportItem>> {
    let mut builder = TreeBuilder::new(items, image_url_prefix);
    for item in items {
        builder.push(item)?;
    }
    debug!("Report tree built with {} nodes", builder.nodes.len());
    Ok(builder.nodes)
}

/// Where the walk currently is in the hierarchy.
enum Cursor<'a> {
    Start,
    InModule {
        module: &'a str,
        module_id: u32,
    },
    InSubModule {
        module: &'a str,
        module_id: u32,
        sub_module: &'a str,
        sub_module_id: u32,
    },
}

impl<'a> Cursor<'a> {
    fn module(&self) -> Option<(&'a str, u32)> {
        match *self {
            Cursor::Start => None,
            Cursor::InModule { module, module_id }
            | Cursor::InSubModule {
                module, module_id, ..
            } => Some((module, module_id)),
        }
    }

    fn sub_module(&self) -> Option<(&'a str, u32)> {
        match *self {
            Cursor::InSubModule {
                sub_module,
                sub_module_id,
                ..
            } => Some((sub_module, sub_module_id)),
            _ => None,
        }
    }
}

struct TreeBuilder<'a> {
    items: &'a [PlanItem],
    image_url_prefix: &'a str,
    cursor: Cursor<'a>,
    next_id: u32,
    nodes: Vec<ReportItem>,
}

impl<'a> TreeBuilder<'a> {
    fn new(items: &'a [PlanItem], image_url_prefix: &'a str) -> Self {
        Self {
            items,
            image_url_prefix,
            cursor: Cursor::Start,
            next_id: 1,
            nodes: Vec::new(),
        }
    }

    fn push(&mut self, item: &'a PlanItem) -> Result<()> {
        let module_id = match self.cursor.module() {
            Some((module, id)) if module == item.main_module => id,
            _ => {
                let stats = stats::module_stats(self.items, &item.main_module)?;
                let id = self.emit(&item.main_module, NodeType::Module, stats, None);
                self.cursor = Cursor::InModule {
                    module: &item.main_module,
                    module_id: id,
                };
                id
            }
        };

        let sub_module_id = match self.cursor.sub_module() {
            Some((sub_module, id)) if sub_module == item.sub_module => id,
            _ => {
                let stats =
                    stats::sub_module_stats(self.items, &item.main_module, &item.sub_module)?;
                let id = self.emit(&item.sub_module, NodeType::SubModule, stats, Some(module_id));
                self.cursor = Cursor::InSubModule {
                    module: &item.main_module,
                    module_id,
                    sub_module: &item.sub_module,
                    sub_module_id: id,
                };
                id
            }
        };

        let id = self.take_id();
        self.nodes.push(ReportItem {
            id,
            name: item.task_name.clone(),
            node_type: NodeType::Task,
            points: 0,
            percentage: Percentage::from_ratio(item.percent()),
            parent_id: Some(sub_module_id),
            image_url: Some(image_url(self.image_url_prefix, &item.file_name)),
        });
        Ok(())
    }

    fn emit(
        &mut self,
        name: &str,
        node_type: NodeType,
        stats: GroupStats,
        parent_id: Option<u32>,
    ) -> u32 {
        let id = self.take_id();
        self.nodes.push(ReportItem {
            id,
            name: name.to_string(),
            node_type,
            points: stats.points,
            percentage: stats.percentage(),
            parent_id,
            image_url: None,
        });
        id
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub fn image_url(prefix: &str, file_name: &str) -> String {
    format!("{}{}", prefix, urlencoding::encode(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Completion;
    use crate::plan::parse_all;
    use pretty_assertions::assert_eq;

    fn items(names: &[&str]) -> Vec<PlanItem> {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        parse_all(&names).unwrap()
    }

    fn shape(nodes: &[ReportItem]) -> Vec<(u32, &str, NodeType, Option<u32>)> {
        nodes
            .iter()
            .map(|n| (n.id, n.name.as_str(), n.node_type, n.parent_id))
            .collect()
    }

    #[test]
    fn test_two_modules() {
        let plan = items(&["1-A.X-One.png", "2-A.X-Two.png", "3-B-Three.png"]);
        let nodes = build_report_tree(&plan, "images/").unwrap();

        assert_eq!(
            shape(&nodes),
            vec![
                (1, "A", NodeType::Module, None),
                (2, "X", NodeType::SubModule, Some(1)),
                (3, "One", NodeType::Task, Some(2)),
                (4, "Two", NodeType::Task, Some(2)),
                (5, "B", NodeType::Module, None),
                (6, "B", NodeType::SubModule, Some(5)),
                (7, "Three", NodeType::Task, Some(6)),
            ]
        );
        assert_eq!(nodes[0].points, 2);
        assert_eq!(nodes[1].points, 2);
        assert_eq!(nodes[4].points, 1);
        assert!(nodes.iter().all(|n| n.percentage.to_string() == "0.00"));
    }

    #[test]
    fn test_every_task_parent_is_an_earlier_sub_module() {
        let plan = items(&[
            "1-A.X-One.png",
            "2-A.Y-Two.png",
            "3-A.Y-Three.png",
            "4-B.Z-Four.png",
            "5-C-Five.png",
        ]);
        let nodes = build_report_tree(&plan, "images/").unwrap();

        for (pos, node) in nodes.iter().enumerate() {
            if node.node_type != NodeType::Task {
                continue;
            }
            let parent_id = node.parent_id.unwrap();
            let parent_pos = nodes.iter().position(|n| n.id == parent_id).unwrap();
            assert!(parent_pos < pos);
            assert_eq!(nodes[parent_pos].node_type, NodeType::SubModule);
        }

        let module_points: Vec<(&str, usize)> = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Module)
            .map(|n| (n.name.as_str(), n.points))
            .collect();
        assert_eq!(module_points, vec![("A", 3), ("B", 1), ("C", 1)]);
    }

    #[test]
    fn test_same_sub_module_name_in_next_module_gets_new_node() {
        let plan = items(&["1-A.X-One.png", "2-B.X-Two.png"]);
        let nodes = build_report_tree(&plan, "images/").unwrap();

        assert_eq!(
            shape(&nodes),
            vec![
                (1, "A", NodeType::Module, None),
                (2, "X", NodeType::SubModule, Some(1)),
                (3, "One", NodeType::Task, Some(2)),
                (4, "B", NodeType::Module, None),
                (5, "X", NodeType::SubModule, Some(4)),
                (6, "Two", NodeType::Task, Some(5)),
            ]
        );
    }

    #[test]
    fn test_interleaved_module_is_split_but_counts_whole_module() {
        let plan = items(&["1-A-One.png", "2-B-Two.png", "3-A-Three.png"]);
        let nodes = build_report_tree(&plan, "images/").unwrap();

        let modules: Vec<(u32, &str, usize)> = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Module)
            .map(|n| (n.id, n.name.as_str(), n.points))
            .collect();
        assert_eq!(modules, vec![(1, "A", 2), (4, "B", 1), (7, "A", 2)]);
    }

    #[test]
    fn test_percentages_and_image_urls() {
        let mut plan = items(&["1-A-My Task.png", "2-A-Other.png"]);
        plan[0] = plan[0].clone().with_completion(Completion::new(0.5, 0.0, 0.0, 0.0));

        let nodes = build_report_tree(&plan, "images/").unwrap();

        assert_eq!(nodes[0].percentage.to_string(), "6.25");
        assert_eq!(nodes[2].name, "My Task");
        assert_eq!(nodes[2].percentage.to_string(), "12.50");
        assert_eq!(nodes[2].image_url.as_deref(), Some("images/1-A-My%20Task.png"));
        assert_eq!(nodes[3].percentage.to_string(), "0.00");
        assert_eq!(nodes[0].image_url, None);
    }

    #[test]
    fn test_report_global_stats() {
        let plan = items(&["1-A.X-One.png", "2-A.X-Two.png", "3-B-Three.png"]);
        let report = build_report(&plan, "images/").unwrap();
        assert_eq!(report.points, 3);
        assert_eq!(report.percentage.to_string(), "0.00");
        assert_eq!(
            report.items.iter().filter(|n| n.node_type == NodeType::Task).count(),
            3
        );
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], "images/").unwrap();
        assert!(report.items.is_empty());
        assert_eq!(report.points, 0);
        assert_eq!(report.percentage.to_string(), "0.00");
    }
}
