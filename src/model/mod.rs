// In: src/model/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Model Layer
// ====================================================================================
//
// A `Model` is the per-attribute codec seam. The engines never know how a
// column's values are coded; they only uphold the protocol:
//
//   * columns are processed strictly in the stream's attribute order;
//   * the model for a column sees, through `ColumnContext`, only columns
//     materialized earlier in that order;
//   * a model consumes (or emits) a self-delimited span of bits with no
//     lookahead past that span.
//
// Models declare the columns they condition on via `dependencies()`; both
// engines verify at configuration time that every declared dependency
// precedes its dependent in the attribute order, so a violating order is
// rejected before any bit moves.
//
// The reference models in `plain`/`delta` code physical representations
// directly; logical-type validation stays in the attribute layer's creators.
// ====================================================================================

pub(crate) mod delta;
pub(crate) mod plain;

pub use delta::DeltaIntegerModel;
pub use plain::{PlainDoubleModel, PlainEnumModel, PlainIntegerModel, PlainStringModel};

use crate::error::RowpackError;
use crate::schema::Schema;
use crate::stream::{ByteReader, ByteWriter};
use crate::types::AttrValue;

/// Per-attribute probabilistic codec.
///
/// Implementations are stateless across tuples except for the bits they pull
/// from (or push to) the shared stream. Encode and decode must consume the
/// same context and produce/consume the same bit span for the same value.
pub trait Model: Send {
    /// Schema column indices this model conditions on. The engines reject an
    /// attribute order in which any of these does not precede the model's own
    /// column.
    fn dependencies(&self) -> &[usize] {
        &[]
    }

    /// Emits `value` onto the stream, conditioned on `ctx`.
    fn encode_value(
        &self,
        value: &AttrValue,
        ctx: &ColumnContext<'_>,
        writer: &mut ByteWriter,
    ) -> Result<(), RowpackError>;

    /// Reconstructs exactly one value from the stream, conditioned on `ctx`,
    /// advancing the cursor by exactly the bits the encoder emitted.
    fn decode_value(
        &self,
        ctx: &ColumnContext<'_>,
        reader: &mut ByteReader,
    ) -> Result<AttrValue, RowpackError>;
}

/// Read access to the columns of the current tuple that have already been
/// materialized, in attribute order.
///
/// Asking for a column that is not yet materialized is a protocol violation
/// by the model and fails loudly; it can never yield another column's bits.
pub struct ColumnContext<'a> {
    slots: &'a [Option<AttrValue>],
}

impl<'a> ColumnContext<'a> {
    pub(crate) fn new(slots: &'a [Option<AttrValue>]) -> Self {
        Self { slots }
    }

    /// True if `column` has been materialized for the current tuple.
    pub fn is_materialized(&self, column: usize) -> bool {
        matches!(self.slots.get(column), Some(Some(_)))
    }

    /// Borrows the already-decoded value of `column`.
    pub fn value(&self, column: usize) -> Result<&AttrValue, RowpackError> {
        match self.slots.get(column) {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(RowpackError::ModelError(format!(
                "context access to column {} before it is materialized",
                column
            ))),
            None => Err(RowpackError::ModelError(format!(
                "context access to column {} out of range (len {})",
                column,
                self.slots.len()
            ))),
        }
    }
}

/// Validates that a schema, a model array, and an attribute order form a
/// coherent plan. Both engines run this eagerly at configuration time; a
/// mismatch is never deferred to the tuple loop.
pub fn validate_plan(
    schema: &Schema,
    models: &[Box<dyn Model>],
    attr_order: &[usize],
) -> Result<(), RowpackError> {
    if models.len() != schema.len() {
        return Err(RowpackError::ConfigMismatch(format!(
            "schema has {} columns but {} models were supplied",
            schema.len(),
            models.len()
        )));
    }
    if attr_order.len() != schema.len() {
        return Err(RowpackError::ConfigMismatch(format!(
            "schema has {} columns but the attribute order lists {}",
            schema.len(),
            attr_order.len()
        )));
    }

    // The order must be a permutation of 0..len.
    let mut position = vec![None; schema.len()];
    for (pos, &column) in attr_order.iter().enumerate() {
        if column >= schema.len() {
            return Err(RowpackError::ConfigMismatch(format!(
                "attribute order references column {} beyond schema width {}",
                column,
                schema.len()
            )));
        }
        if position[column].is_some() {
            return Err(RowpackError::ConfigMismatch(format!(
                "attribute order lists column {} twice",
                column
            )));
        }
        position[column] = Some(pos);
    }

    // Every declared dependency must be materialized before its dependent.
    for (column, model) in models.iter().enumerate() {
        let own_pos = position[column].expect("permutation covers every column");
        for &dep in model.dependencies() {
            if dep >= schema.len() {
                return Err(RowpackError::ConfigMismatch(format!(
                    "model for column {} depends on column {} beyond schema width {}",
                    column,
                    dep,
                    schema.len()
                )));
            }
            let dep_pos = position[dep].expect("permutation covers every column");
            if dep_pos >= own_pos {
                return Err(RowpackError::ConfigMismatch(format!(
                    "model for column {} depends on column {}, which the attribute \
                     order does not materialize first",
                    column, dep
                )));
            }
        }
    }
    Ok(())
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttrType;

    fn int_schema(width: usize) -> Schema {
        Schema::new(vec![AttrType::INTEGER; width])
    }

    fn plain_models(width: usize) -> Vec<Box<dyn Model>> {
        (0..width)
            .map(|_| Box::new(PlainIntegerModel::new()) as Box<dyn Model>)
            .collect()
    }

    #[test]
    fn test_validate_plan_accepts_any_permutation_without_deps() {
        let schema = int_schema(3);
        let models = plain_models(3);
        assert!(validate_plan(&schema, &models, &[2, 0, 1]).is_ok());
    }

    #[test]
    fn test_validate_plan_rejects_wrong_model_count() {
        let schema = int_schema(3);
        let models = plain_models(2);
        assert!(matches!(
            validate_plan(&schema, &models, &[0, 1, 2]),
            Err(RowpackError::ConfigMismatch(_))
        ));
    }

    #[test]
    fn test_validate_plan_rejects_non_permutations() {
        let schema = int_schema(3);
        let models = plain_models(3);
        for bad_order in [&[0usize, 1, 1][..], &[0, 1, 3][..], &[0, 1][..]] {
            assert!(matches!(
                validate_plan(&schema, &models, bad_order),
                Err(RowpackError::ConfigMismatch(_))
            ));
        }
    }

    #[test]
    fn test_validate_plan_enforces_dependency_order() {
        let schema = int_schema(2);
        let mut models = plain_models(2);
        // Column 1 conditions on column 0.
        models[1] = Box::new(DeltaIntegerModel::new(0));

        assert!(validate_plan(&schema, &models, &[0, 1]).is_ok());
        assert!(matches!(
            validate_plan(&schema, &models, &[1, 0]),
            Err(RowpackError::ConfigMismatch(_))
        ));
    }

    #[test]
    fn test_context_refuses_unmaterialized_columns() {
        let slots = vec![Some(AttrValue::Integer(34)), None];
        let ctx = ColumnContext::new(&slots);
        assert!(ctx.is_materialized(0));
        assert!(!ctx.is_materialized(1));
        assert_eq!(ctx.value(0).unwrap().as_integer().unwrap(), 34);
        assert!(matches!(ctx.value(1), Err(RowpackError::ModelError(_))));
        assert!(matches!(ctx.value(9), Err(RowpackError::ModelError(_))));
    }
}
