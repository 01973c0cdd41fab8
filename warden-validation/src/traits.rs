// Validation traits

use crate::Conditions;

/// A validator bound to a fixed list of fields.
///
/// `run` evaluates the declaration's gate once and then checks each field
/// in declaration order. A failure on one field never stops the others.
pub trait FieldValidator<R>: Send + Sync {
    /// Fields covered, in declaration order
    fn fields(&self) -> &[String];

    /// Gate guarding the whole declaration
    fn conditions(&self) -> &Conditions<R>;

    /// Check one field, recording failures on the record
    fn validate_field(&self, record: &mut R, field: &str);

    /// Check every field of `record` when the gate permits it
    fn run(&self, record: &mut R) {
        if !self.conditions().permits(record) {
            tracing::trace!(fields = ?self.fields(), "validation skipped by condition");
            return;
        }
        for field in self.fields() {
            self.validate_field(record, field);
        }
    }
}
