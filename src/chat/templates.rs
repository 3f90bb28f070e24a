//! Outbound notification texts, rendered with minijinja.

use crate::task::domain::TaskEvent;
use crate::task::ports::NotifyError;
use minijinja::{Environment, context};

const CREATED: &str = "\u{1f4cb} New task for {{ assignee }}: {{ title }}\
{% if deadline %}\nDeadline: {{ deadline }}{% endif %}";

const SUBMITTED: &str = "\u{1f4e4} {{ assignee }} submitted \"{{ title }}\" for review";

const APPROVED: &str = "\u{2705} \"{{ title }}\" approved!\n\
{{ assignee }} spent {{ minutes }} min, efficiency {{ efficiency }}\
{% if points > 0 %}, +{{ points }} point{% endif %}";

const REVISION: &str = "\u{1f501} \"{{ title }}\" needs changes.\n\
{{ assignee }}, reviewer comment: {{ comment }}";

const COMPLETED: &str = "\u{2611} \"{{ title }}\" marked completed";

/// Renders the outbound message for an event; `None` for events that are
/// not announced (returns and deletions stay silent).
///
/// # Errors
///
/// Returns [`NotifyError::Render`] when the template engine fails.
pub fn render_event(event: &TaskEvent) -> Result<Option<String>, NotifyError> {
    let environment = Environment::new();
    let rendered = match event {
        TaskEvent::Created(task) => Some(environment.render_str(
            CREATED,
            context! {
                assignee => task.assignee(),
                title => task.title(),
                deadline => task.deadline().map(|deadline| deadline.to_string()),
            },
        )),
        TaskEvent::Submitted(task) => Some(environment.render_str(
            SUBMITTED,
            context! {
                assignee => task.assignee(),
                title => task.title(),
            },
        )),
        TaskEvent::Approved {
            task,
            metrics,
            points_awarded,
        } => Some(environment.render_str(
            APPROVED,
            context! {
                title => task.title(),
                assignee => task.assignee(),
                minutes => metrics.time_spent_minutes,
                efficiency => metrics.efficiency.value(),
                points => points_awarded,
            },
        )),
        TaskEvent::RevisionRequested { task, comment } => Some(environment.render_str(
            REVISION,
            context! {
                title => task.title(),
                assignee => task.assignee(),
                comment => comment,
            },
        )),
        TaskEvent::Completed(task) => Some(environment.render_str(
            COMPLETED,
            context! {
                title => task.title(),
            },
        )),
        TaskEvent::Returned(_) | TaskEvent::Deleted { .. } => None,
    };
    rendered
        .transpose()
        .map_err(|err| NotifyError::Render(err.to_string()))
}
