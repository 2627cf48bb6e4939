//! Completion of change-feed function definitions.

use crate::command_type::{Capability, CommandType};
use crate::definition::{ChangeFeedTrigger, DocumentProperty};
use crate::error::ResolveError;

/// Serializable fields of a change-feed command, with their wire names.
pub fn document_properties(command: &CommandType) -> Vec<DocumentProperty> {
    command
        .bindable_fields()
        .map(|field| DocumentProperty {
            name: field.name.clone(),
            wire_name: field.wire_name().to_string(),
            type_name: field.ty.type_name(),
            field_type: field.ty.clone(),
        })
        .collect()
}

pub fn complete_change_feed_definition(
    command: &CommandType,
    change_feed: &mut ChangeFeedTrigger,
) -> Result<(), ResolveError> {
    change_feed.command_properties = document_properties(command);
    change_feed.is_document_command = command.implements(Capability::DocumentCommand);
    change_feed.is_document_batch_command = command.implements(Capability::DocumentBatchCommand);
    if change_feed.is_document_command && change_feed.is_document_batch_command {
        return Err(ResolveError::AmbiguousDocumentCommand {
            command: command.name.clone(),
        });
    }

    tracing::debug!(
        command = %command.name,
        collection = %change_feed.collection,
        properties = change_feed.command_properties.len(),
        document = change_feed.is_document_command,
        batch = change_feed.is_document_batch_command,
        "completed change-feed definition"
    );
    Ok(())
}
