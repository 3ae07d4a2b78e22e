//! Seed digest canonicalization
//!
//! Fields and layouts are sorted by id before hashing. Groups and elements
//! keep their order because order is meaningful in a layout.

use crate::errors::Result;
use crate::seed::format_v0::{SeedField, SeedLayout, SeedV0};
use layoutx_core::errors::{ExError, ExErrorKind};
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Serialize)]
struct CanonicalSeed<'a> {
    schema_version: u32,
    fields: Vec<&'a SeedField>,
    layouts: Vec<&'a SeedLayout>,
}

/// Compute a stable SHA-256 hex digest for a seed
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let mut fields: Vec<&SeedField> = seed.fields.iter().collect();
    fields.sort_by_key(|f| f.id);
    let mut layouts: Vec<&SeedLayout> = seed.layouts.iter().collect();
    layouts.sort_by(|a, b| a.id.cmp(&b.id));

    let canonical = CanonicalSeed {
        schema_version: seed.schema_version,
        fields,
        layouts,
    };
    let json = serde_json::to_vec(&canonical).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("seed_digest")
            .with_message(e.to_string())
    })?;

    Ok(hex::encode(Sha256::digest(&json)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parser::parse_seed_str;

    const SEED_A: &str = r#"
schema_version: 0
fields:
  - { id: 7, name: Body, handle: body, kind: Text }
  - { id: 9, name: Image, handle: image, kind: Assets }
layouts: []
"#;

    const SEED_A_REORDERED: &str = r#"
schema_version: 0
fields:
    - id: 9
      name: Image
      handle: image
      kind: Assets
    - id: 7
      name: Body
      handle: body
      kind: Text
"#;

    #[test]
    fn test_digest_ignores_formatting_and_field_order() {
        let a = compute_seed_digest(&parse_seed_str(SEED_A).unwrap()).unwrap();
        let b = compute_seed_digest(&parse_seed_str(SEED_A_REORDERED).unwrap()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_digest_sensitive_to_element_order() {
        let first = r#"
schema_version: 0
layouts:
  - id: l
    owner_kind: volume
    groups:
      - name: G
        elements:
          - { type: Heading }
          - { type: LineBreak }
"#;
        let second = first
            .replace("{ type: Heading }", "{ type: TMP }")
            .replace("{ type: LineBreak }", "{ type: Heading }")
            .replace("{ type: TMP }", "{ type: LineBreak }");

        let a = compute_seed_digest(&parse_seed_str(first).unwrap()).unwrap();
        let b = compute_seed_digest(&parse_seed_str(&second).unwrap()).unwrap();

        assert_ne!(a, b);
    }
}
