use crate::error::{Error, Result};
use crate::model::{Completion, PlanItem};

/// Build a [`PlanItem`] from an image file name:
/// `[Seq No.]-[Module.SubModule]-[TaskName].png`
///
/// - the sequence number before the first `-` is dropped
/// - the module spec runs up to the next `-`; everything after it is the task
/// - only the first `.` of the module spec separates module from sub-module
/// - only the last `.` of the task is an extension
pub fn parse_file_name(file_name: &str) -> Result<PlanItem> {
    let rest = match file_name.split_once('-') {
        Some((seq, rest)) if !seq.is_empty() => rest,
        _ => return Err(Error::malformed(file_name)),
    };

    let (modules, raw_task) = match rest.split_once('-') {
        Some((modules, task)) if !modules.is_empty() => (modules, task),
        _ => return Err(Error::malformed(file_name)),
    };

    // No "." means the sub-module is the main module itself
    let (main_module, sub_module) = modules.split_once('.').unwrap_or((modules, modules));

    let task_name = match raw_task.rfind('.') {
        Some(pos) if pos > 0 => &raw_task[..pos],
        _ => raw_task,
    };

    Ok(PlanItem {
        file_name: file_name.to_string(),
        main_module: main_module.to_string(),
        sub_module: sub_module.to_string(),
        task_name: task_name.to_string(),
        completion: Completion::default(),
    })
}
