//! Inline keyboard affordance computation.
//!
//! Which buttons a caller is offered is itself an authorization decision:
//! outside the work chat nothing is offered, and each action appears only
//! for the status and role combination that would pass the engine's guards.

use crate::access::domain::Caller;
use crate::command::InlineAction;
use crate::task::domain::{Task, TaskStatus};

/// Computes the inline actions to offer `caller` for `task`.
#[must_use]
pub fn available_actions(task: &Task, caller: &Caller) -> Vec<InlineAction> {
    if !caller.context.is_work_chat {
        return Vec::new();
    }

    let manages = caller.context.can_manage();
    let is_assignee = caller.is_assignee_of(task.assignee());
    let id = task.id();
    let mut actions = Vec::new();

    match task.status() {
        TaskStatus::Pending => {
            if is_assignee {
                actions.push(InlineAction::Submit(id));
            }
            if manages {
                actions.push(InlineAction::Complete(id));
            }
        }
        TaskStatus::Review => {
            if manages {
                actions.push(InlineAction::Approve(id));
                actions.push(InlineAction::Revision(id));
            }
        }
        TaskStatus::Revision => {
            if is_assignee {
                actions.push(InlineAction::Return(id));
            }
            if manages {
                actions.push(InlineAction::Complete(id));
            }
        }
        TaskStatus::Completed => {}
    }

    if manages || caller.user_id == task.created_by() {
        actions.push(InlineAction::Delete(id));
    }
    actions
}
