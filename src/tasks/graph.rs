//! Dependency checks over the ordered step list.

use std::any::TypeId;
use std::collections::HashMap;

use super::Task;
use crate::error::TaskError;

/// Verify that every dependency of every step is registered earlier in
/// `tasks`.
///
/// Steps run strictly in list order, so a dependency registered later (or
/// a cycle, which implies one) would run too late.
///
/// # Errors
///
/// Returns [`TaskError::MissingDependency`] if a dependency is not in the
/// list at all, or [`TaskError::DependencyOrder`] if it comes after its
/// dependent.
pub fn validate_order(tasks: &[&dyn Task]) -> Result<(), TaskError> {
    let position: HashMap<TypeId, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.task_id(), i))
        .collect();

    for (i, task) in tasks.iter().enumerate() {
        for dep in task.dependencies() {
            let Some(&dep_idx) = position.get(dep) else {
                return Err(TaskError::MissingDependency(task.name().to_string()));
            };
            if dep_idx >= i {
                let dependency = tasks
                    .get(dep_idx)
                    .map_or_else(String::new, |d| d.name().to_string());
                return Err(TaskError::DependencyOrder {
                    task: task.name().to_string(),
                    dependency,
                });
            }
        }
    }
    Ok(())
}
