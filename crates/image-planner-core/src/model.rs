use std::fmt;

/// Completion of one task across its four dimensions, each a ratio in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Completion {
    /// User interface
    pub ui: f64,
    /// Business logic
    pub business: f64,
    /// User experience
    pub experience: f64,
    /// Final works and everything else
    pub misc: f64,
}

impl Completion {
    pub fn new(ui: f64, business: f64, experience: f64, misc: f64) -> Self {
        Self {
            ui,
            business,
            experience,
            misc,
        }
    }

    pub fn sum(&self) -> f64 {
        self.ui + self.business + self.experience + self.misc
    }

    pub fn average(&self) -> f64 {
        self.sum() / 4.0
    }
}

/// One task, identified by the image file it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanItem {
    pub file_name: String,
    pub main_module: String,
    pub sub_module: String,
    pub task_name: String,
    pub completion: Completion,
}

impl PlanItem {
    /// Same item with its completion replaced; identity and hierarchy are untouched.
    pub fn with_completion(self, completion: Completion) -> Self {
        Self { completion, ..self }
    }

    pub fn percent(&self) -> f64 {
        self.completion.average()
    }

    /// Case-insensitive identity key.
    pub fn identity(&self) -> String {
        identity_key(&self.file_name)
    }
}

pub(crate) fn identity_key(file_name: &str) -> String {
    file_name.to_lowercase()
}

/// A percentage held in hundredths of a percent, so `12.50%` is `1250`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(i64);

impl Percentage {
    /// Scale a `[0, 1]` ratio to percent, rounding to two decimals half-to-even.
    pub fn from_ratio(ratio: f64) -> Self {
        Percentage(round_half_even(ratio * 10_000.0))
    }
}

fn round_half_even(scaled: f64) -> i64 {
    scaled.round_ties_even() as i64
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Module,
    SubModule,
    Task,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Module => "module",
            NodeType::SubModule => "sub-module",
            NodeType::Task => "task",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the report tree. Ids are 1-based in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportItem {
    pub id: u32,
    pub name: String,
    pub node_type: NodeType,
    /// Task count under a module or sub-module; 0 for tasks.
    pub points: usize,
    pub percentage: Percentage,
    /// `None` for modules.
    pub parent_id: Option<u32>,
    /// Set for tasks only.
    pub image_url: Option<String>,
}
