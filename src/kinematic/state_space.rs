//! Description of the space states live in: dimension, bounds, resolution
//! and the kind of every component.

use crate::common::{ComponentKind, KinematicsError, KinematicsResult, State, StateComponent};

/// A group of components that are sampled together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentBlock {
    /// Single linear or wrapping-angle component
    Scalar(usize),
    /// Quaternion spanning components `start..start + 4`
    Quaternion(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    components: Vec<StateComponent>,
    blocks: Vec<ComponentBlock>,
}

impl StateSpace {
    /// Validate the component descriptions and group them into blocks
    pub fn new(components: Vec<StateComponent>) -> KinematicsResult<Self> {
        if components.is_empty() {
            return Err(KinematicsError::InvalidParameter(
                "state space needs at least one component".to_string(),
            ));
        }

        if let Some((index, comp)) =
            components.iter().enumerate().find(|(_, c)| !(c.min_value <= c.max_value))
        {
            return Err(KinematicsError::InvalidComponent {
                index,
                reason: format!("min {} exceeds max {}", comp.min_value, comp.max_value),
            });
        }

        let mut blocks = Vec::with_capacity(components.len());
        let mut i = 0;
        while i < components.len() {
            let comp = &components[i];
            match comp.kind {
                ComponentKind::Quaternion => {
                    let end = i + 4;
                    if end > components.len()
                        || components[i..end].iter().any(|c| c.kind != ComponentKind::Quaternion)
                    {
                        return Err(KinematicsError::QuaternionBlock(i));
                    }
                    blocks.push(ComponentBlock::Quaternion(i));
                    i = end;
                }
                _ => {
                    if !(comp.resolution > 0.0) {
                        return Err(KinematicsError::InvalidComponent {
                            index: i,
                            reason: format!("resolution must be positive, got {}", comp.resolution),
                        });
                    }
                    blocks.push(ComponentBlock::Scalar(i));
                    i += 1;
                }
            }
        }

        Ok(Self { components, blocks })
    }

    /// Start describing a space component by component
    pub fn builder() -> StateSpaceBuilder {
        StateSpaceBuilder::default()
    }

    /// Number of components of every state in this space
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Description of component `i`
    pub fn component(&self, i: usize) -> &StateComponent {
        &self.components[i]
    }

    pub fn components(&self) -> &[StateComponent] {
        &self.components
    }

    /// Components grouped the way they are sampled
    pub fn blocks(&self) -> &[ComponentBlock] {
        &self.blocks
    }

    pub fn quaternion_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().filter_map(|b| match b {
            ComponentBlock::Quaternion(start) => Some(*start),
            ComponentBlock::Scalar(_) => None,
        })
    }

    pub fn alloc_state(&self) -> State {
        State::zeros(self.dimension())
    }

    pub fn state_from_slice(&self, values: &[f64]) -> KinematicsResult<State> {
        if values.len() != self.dimension() {
            return Err(KinematicsError::DimensionMismatch {
                expected: self.dimension(),
                found: values.len(),
            });
        }
        Ok(State::from_slice(values))
    }

    pub fn satisfies_bounds(&self, state: &State) -> bool {
        self.assert_dimension(state);
        self.components
            .iter()
            .zip(state.values.iter())
            .all(|(c, &v)| c.contains(v))
    }

    /// Clamp every component to its nearest bound
    pub fn enforce_bounds(&self, state: &mut State) {
        self.assert_dimension(state);
        for (c, v) in self.components.iter().zip(state.values.iter_mut()) {
            *v = c.clamp(*v);
        }
    }

    pub(crate) fn assert_dimension(&self, state: &State) {
        assert_eq!(
            state.dimension(),
            self.dimension(),
            "state dimension does not match the space"
        );
    }
}

/// Incrementally describes a [`StateSpace`]
#[derive(Debug, Clone, Default)]
pub struct StateSpaceBuilder {
    components: Vec<StateComponent>,
}

impl StateSpaceBuilder {
    pub fn linear(mut self, min_value: f64, max_value: f64, resolution: f64) -> Self {
        self.components.push(StateComponent::linear(min_value, max_value, resolution));
        self
    }

    pub fn wrapping_angle(mut self, resolution: f64) -> Self {
        self.components.push(StateComponent::wrapping_angle(resolution));
        self
    }

    /// Append a full 4-component quaternion block
    pub fn quaternion(mut self, resolution: f64) -> Self {
        for _ in 0..4 {
            self.components.push(StateComponent::quaternion(resolution));
        }
        self
    }

    pub fn component(mut self, component: StateComponent) -> Self {
        self.components.push(component);
        self
    }

    pub fn build(self) -> KinematicsResult<StateSpace> {
        StateSpace::new(self.components)
    }
}
