// Domain layer: the vehicle model and the ports its collaborators implement.
// Nothing in here touches the filesystem or a runtime.

pub mod maintenance;
pub mod ports;
pub mod record;
pub mod vehicle;

/// `<prefix>-<uuid>`, matching the ids the garage has always persisted.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
