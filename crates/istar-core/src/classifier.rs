//! Structural role classification
//!
//! Tags intentions as leaves (no incoming contribution, decomposition or
//! dependency) or roots (no outgoing ones). Depender tags are written at
//! construction time and always win over the root tag. Both passes recurse
//! through nested boundaries and are idempotent.

use crate::error::LookupError;
use crate::intention::Role;
use crate::model::GoalModel;
use crate::types::BoundaryId;

impl GoalModel {
    /// Tag every leaf-shaped intention below `boundary` as `Leaf`
    ///
    /// An intention tagged `Leaf` that has since gained incoming links
    /// loses the tag.
    pub fn find_leaf(&mut self, boundary: BoundaryId) -> Result<usize, LookupError> {
        let mut leaves = 0;
        for b in self.subtree(boundary)? {
            leaves += self.find_leaf_local(b);
        }
        Ok(leaves)
    }

    /// Tag every root-shaped, non-depender intention below `boundary` as
    /// `Root`
    pub fn find_root(&mut self, boundary: BoundaryId) -> Result<usize, LookupError> {
        let mut roots = 0;
        for b in self.subtree(boundary)? {
            for id in self.boundaries[b.0].intentions.clone() {
                let intention = &mut self.intentions[id.0];
                if intention.role == Some(Role::Depender) {
                    continue;
                }
                if intention.is_root_shaped() {
                    intention.role = Some(Role::Root);
                    roots += 1;
                } else if intention.role == Some(Role::Root) {
                    intention.role = None;
                }
            }
        }
        Ok(roots)
    }

    /// Leaf pass over the intentions owned directly by `boundary`
    pub(crate) fn find_leaf_local(&mut self, boundary: BoundaryId) -> usize {
        let mut leaves = 0;
        for id in self.boundaries[boundary.0].intentions.clone() {
            let intention = &mut self.intentions[id.0];
            if intention.is_leaf_shaped() {
                intention.role = Some(Role::Leaf);
                leaves += 1;
            } else if intention.role == Some(Role::Leaf) {
                intention.role = None;
            }
        }
        leaves
    }
}
