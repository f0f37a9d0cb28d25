use crate::{
    effectors::effector::{DataType, Effector, chain_compatible},
    foundation::error::{LumenError, LumenResult},
};

/// An ordered list of effectors whose adjacent data types line up.
///
/// The first effector must accept a [`PixelBuffer`](crate::PixelBuffer); each later one must
/// accept what its predecessor produces. Appends are validated before anything is inserted.
#[derive(Clone, Debug, Default)]
pub struct EffectorChain {
    effectors: Vec<Effector>,
}

impl EffectorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `incoming` as a unit.
    ///
    /// On a type mismatch nothing is appended and the error carries the chain index the
    /// rejected effector would have taken.
    pub fn extend(&mut self, incoming: impl IntoIterator<Item = Effector>) -> LumenResult<()> {
        let incoming: Vec<Effector> = incoming.into_iter().collect();
        let mut prev = self.effectors.last();
        for (offset, next) in incoming.iter().enumerate() {
            let position = self.effectors.len() + offset;
            let accepted = match prev {
                Some(p) => chain_compatible(p, next),
                None => next.input_type() == DataType::Pixels,
            };
            if !accepted {
                let produced = prev.map_or(DataType::Pixels, Effector::output_type);
                let producer = prev.map_or("the loaded image", Effector::name);
                return Err(LumenError::chain(
                    position,
                    format!(
                        "{} expects {} but {producer} produces {produced}",
                        next.name(),
                        next.input_type()
                    ),
                ));
            }
            prev = Some(next);
        }
        self.effectors.extend(incoming);
        Ok(())
    }

    pub fn push(&mut self, effector: Effector) -> LumenResult<()> {
        self.extend([effector])
    }

    pub fn clear(&mut self) {
        self.effectors.clear();
    }

    pub fn len(&self) -> usize {
        self.effectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effector> {
        self.effectors.iter()
    }

    pub fn as_slice(&self) -> &[Effector] {
        &self.effectors
    }

    /// What running the chain ends with; an empty chain passes pixels through.
    pub fn output_type(&self) -> DataType {
        self.effectors
            .last()
            .map_or(DataType::Pixels, Effector::output_type)
    }
}

impl<'a> IntoIterator for &'a EffectorChain {
    type Item = &'a Effector;
    type IntoIter = std::slice::Iter<'a, Effector>;

    fn into_iter(self) -> Self::IntoIter {
        self.effectors.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/chain.rs"]
mod tests;
