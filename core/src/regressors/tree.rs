use serde::{Deserialize, Serialize};

use super::growth::{Growth, RegressionTree};
use super::{ModelKind, Regressor};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// None = voks til bladene er rene
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TreeParams {
    pub(crate) fn growth(&self) -> Growth {
        Growth::cart(self.max_depth, self.min_samples_split, self.min_samples_leaf)
    }
}

/// Ett CART-regresjonstre. Alle features vurderes i hver node.
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeModel {
    tree: RegressionTree,
}

impl TreeModel {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &TreeParams) -> Result<Self> {
        let tree = RegressionTree::fit_cart(x, y, &params.growth());
        log::debug!("beslutningstre: {} blader", tree.n_leaves());
        Ok(Self { tree })
    }

    pub fn n_leaves(&self) -> usize {
        self.tree.n_leaves()
    }
}

impl Regressor for TreeModel {
    fn name(&self) -> &'static str {
        ModelKind::DecisionTree.name()
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        Ok(x.iter().map(|row| self.tree.predict_row(row)).collect())
    }
}
