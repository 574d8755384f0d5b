//! Resampling of paths and motions at the space resolution.

use crate::common::{KinematicPath, State, StateValidityChecker};
use crate::kinematic::space_information::SpaceInformation;

impl<V: StateValidityChecker> SpaceInformation<V> {
    /// Insert intermediate states between every pair of consecutive states
    /// so that no component moves more than `factor * resolution` per step.
    ///
    /// The original states are kept as anchors. A segment needing `nd` steps
    /// contributes `nd - 1` new states.
    pub fn interpolate_path(&self, path: &mut KinematicPath, factor: f64) {
        if path.len() < 2 {
            return;
        }

        let old_states = std::mem::take(&mut path.states);
        let mut new_states = Vec::with_capacity(old_states.len());
        let mut anchors = old_states.into_iter().peekable();

        while let Some(s1) = anchors.next() {
            let interior: Vec<State> = match anchors.peek() {
                Some(s2) => {
                    let ds = self.find_difference_step(&s1, s2, factor);
                    (1..ds.nd).map(|j| ds.state_at(&s1, j)).collect()
                }
                None => Vec::new(),
            };
            new_states.push(s1);
            new_states.extend(interior);
        }

        path.states = new_states;
    }

    /// Fill `states` with the states of the motion from `s1` to `s2`,
    /// endpoints included.
    ///
    /// With `alloc` set the buffer is resized to hold the full motion
    /// (`nd + 1` states). Otherwise only the existing slots are written: `s1`
    /// first, then the interior states, then `s2` if a slot is left.
    /// Returns the number of states written.
    pub fn get_motion_states(
        &self,
        s1: &State,
        s2: &State,
        states: &mut Vec<State>,
        alloc: bool,
    ) -> usize {
        let ds = self.find_difference_step(s1, s2, 1.0);

        if alloc {
            states.clear();
            states.reserve(ds.nd + 1);
            states.push(s1.clone());
            for j in 1..ds.nd {
                states.push(ds.state_at(s1, j));
            }
            states.push(s2.clone());
            return states.len();
        }

        let capacity = states.len();
        if capacity == 0 {
            return 0;
        }

        states[0].copy_from(s1);
        let mut added = 1;

        for j in 1..ds.nd {
            if added >= capacity {
                break;
            }
            ds.write_state_at(s1, j, &mut states[added]);
            added += 1;
        }

        if added < capacity {
            states[added].copy_from(s2);
            added += 1;
        }

        added
    }
}
