use serde::Serialize;
use verithrax_core::{SaveEvent, PRODUCT_POST_TYPE};

/// Why a save notification produced no webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Revision,
    Autosave,
    NotProduct { post_type: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Revision => write!(f, "revision snapshot"),
            SkipReason::Autosave => write!(f, "autosave snapshot"),
            SkipReason::NotProduct { post_type } => write!(f, "post type \"{post_type}\" is not a product"),
        }
    }
}

/// Decides whether `event` may trigger a webhook.
///
/// Snapshots are checked before the content type.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the event must be ignored.
pub fn check_event(event: &SaveEvent) -> Result<(), SkipReason> {
    if event.is_revision {
        return Err(SkipReason::Revision);
    }
    if event.is_autosave {
        return Err(SkipReason::Autosave);
    }
    if event.post_type != PRODUCT_POST_TYPE {
        return Err(SkipReason::NotProduct {
            post_type: event.post_type.clone(),
        });
    }
    Ok(())
}
