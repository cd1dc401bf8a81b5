//! Validated, ordered body table with a designated reference body.

use crate::body::Body;
use crate::error::ModelError;

/// Ordered bodies plus the index of the reference (fixed) body.
///
/// Built once, never mutated. Safe to share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTable {
    bodies: Vec<Body>,
    reference: usize,
}

impl BodyTable {
    /// Validate every body and resolve the reference body by name.
    pub fn new(bodies: Vec<Body>, reference_name: &str) -> Result<Self, ModelError> {
        if bodies.is_empty() {
            return Err(ModelError::InvalidTable("table must not be empty".into()));
        }
        for (i, body) in bodies.iter().enumerate() {
            body.validate()?;
            if bodies[..i].iter().any(|b| b.name == body.name) {
                return Err(ModelError::InvalidTable(format!(
                    "duplicate body name: {}",
                    body.name
                )));
            }
        }
        let reference = bodies
            .iter()
            .position(|b| b.name == reference_name)
            .ok_or_else(|| ModelError::UnknownBody(reference_name.to_string()))?;
        Ok(Self { bodies, reference })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn reference_index(&self) -> usize {
        self.reference
    }

    pub fn reference(&self) -> &Body {
        &self.bodies[self.reference]
    }

    /// Index of the body named `name`.
    pub fn index_of(&self, name: &str) -> Result<usize, ModelError> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| ModelError::UnknownBody(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar_system::solar_system_table;

    #[test]
    fn builtin_table_reference_is_earth() {
        let t = solar_system_table().unwrap();
        assert_eq!(t.len(), 8);
        assert_eq!(t.reference().name, "Earth");
        assert_eq!(t.index_of("Neptune").unwrap(), 7);
    }

    #[test]
    fn unknown_reference_rejected() {
        let bodies = solar_system_table().unwrap().bodies().to_vec();
        assert_eq!(
            BodyTable::new(bodies, "Pluto"),
            Err(ModelError::UnknownBody("Pluto".into()))
        );
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut bodies = solar_system_table().unwrap().bodies().to_vec();
        bodies.push(bodies[0].clone());
        assert!(matches!(
            BodyTable::new(bodies, "Earth"),
            Err(ModelError::InvalidTable(_))
        ));
    }

    #[test]
    fn empty_table_rejected() {
        assert!(BodyTable::new(Vec::new(), "Earth").is_err());
    }
}
