//! Regresjonstre vokst nivå for nivå, delt av CART, skogen og boosting.
//!
//! Alle noder på et nivå splittes før neste nivå åpnes, så `max_depth = d`
//! gir opptil 2^d blader. Splitt-søket er eksakt og grådig over forhåndssorterte
//! kolonner, med andre-ordens gevinst (XGBoost-formen):
//!
//! `gain = ½ (G_L²/(H_L+λ) + G_R²/(H_R+λ) − G²/(H+λ)) − γ`
//!
//! Med λ = 0 og h = 1 blir dette vanlig varians-reduksjon, og bladverdien
//! `−G/(H+λ)` blir snittet av gradientene med motsatt fortegn. CART bruker
//! g = −y (blad = snitt av y), boosting bruker g = ŷ − y.

use serde::{Deserialize, Serialize};

use crate::metrics::mean;

/// Minste gevinst som regnes som en reell splitt.
const MIN_SPLIT_GAIN: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Growth {
    pub max_depth: u16,
    pub lambda: f64,
    pub gamma: f64,
    pub min_child_weight: f64,
    pub min_samples_split: usize,
}

impl Growth {
    /// Vanlig regresjonstre: λ = 0 og h = 1, så `min_child_weight` teller rader.
    /// `None` = voks til bladene er rene.
    pub(crate) fn cart(
        max_depth: Option<u16>,
        min_samples_split: usize,
        min_samples_leaf: usize,
    ) -> Self {
        Self {
            max_depth: max_depth.unwrap_or(u16::MAX),
            lambda: 0.0,
            gamma: 0.0,
            min_child_weight: min_samples_leaf.max(1) as f64,
            min_samples_split,
        }
    }
}

/// Radindekser sortert per feature. Beregnes én gang og deles av alle runder.
pub(crate) struct SortedColumns {
    order: Vec<Vec<usize>>,
}

impl SortedColumns {
    pub(crate) fn new(x: &[Vec<f64>]) -> Self {
        let n_features = x.first().map(|r| r.len()).unwrap_or(0);
        let order = (0..n_features)
            .map(|f| {
                let mut idx: Vec<usize> = (0..x.len()).collect();
                idx.sort_by(|&a, &b| x[a][f].total_cmp(&x[b][f]));
                idx
            })
            .collect();
        Self { order }
    }
}

#[derive(Debug, Clone, Copy)]
struct Open {
    node: usize,
    g: f64,
    h: f64,
    count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    gain: f64,
    feature: usize,
    threshold: f64,
    g_left: f64,
    h_left: f64,
    count_left: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Scan {
    g: f64,
    h: f64,
    count: usize,
    last: f64,
}

fn leaf_weight(g: f64, h: f64, lambda: f64) -> f64 {
    let denom = h + lambda;
    if denom > 0.0 {
        -g / denom
    } else {
        0.0
    }
}

fn score(g: f64, h: f64, lambda: f64) -> f64 {
    let denom = h + lambda;
    if denom > 0.0 {
        g * g / denom
    } else {
        0.0
    }
}

/// Ett regresjonstre i en boosting-ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    pub(crate) fn grow(
        x: &[Vec<f64>],
        sorted: &SortedColumns,
        grad: &[f64],
        hess: &[f64],
        p: &Growth,
    ) -> Self {
        let n = x.len();
        let g0: f64 = grad.iter().sum();
        let h0: f64 = hess.iter().sum();

        let mut nodes = vec![Node::Leaf {
            value: leaf_weight(g0, h0, p.lambda),
        }];
        let mut position = vec![0usize; n];
        let mut frontier = vec![Open {
            node: 0,
            g: g0,
            h: h0,
            count: n,
        }];

        for _ in 0..p.max_depth {
            if frontier.is_empty() {
                break;
            }

            // node-id -> plass i frontier (usize::MAX = lukket blad)
            let mut slot = vec![usize::MAX; nodes.len()];
            for (k, open) in frontier.iter().enumerate() {
                slot[open.node] = k;
            }

            let mut best: Vec<Option<Candidate>> = vec![None; frontier.len()];
            for (f, order) in sorted.order.iter().enumerate() {
                let mut scan = vec![Scan::default(); frontier.len()];
                for &i in order {
                    let k = slot[position[i]];
                    if k == usize::MAX {
                        continue;
                    }
                    let v = x[i][f];
                    let s = &mut scan[k];
                    if s.count > 0 && v > s.last {
                        let open = &frontier[k];
                        let (gl, hl) = (s.g, s.h);
                        let (gr, hr) = (open.g - gl, open.h - hl);
                        if hl >= p.min_child_weight && hr >= p.min_child_weight {
                            let gain = 0.5
                                * (score(gl, hl, p.lambda) + score(gr, hr, p.lambda)
                                    - score(open.g, open.h, p.lambda))
                                - p.gamma;
                            let better = match &best[k] {
                                Some(c) => gain > c.gain,
                                None => gain > MIN_SPLIT_GAIN,
                            };
                            if better {
                                best[k] = Some(Candidate {
                                    gain,
                                    feature: f,
                                    threshold: 0.5 * (s.last + v),
                                    g_left: gl,
                                    h_left: hl,
                                    count_left: s.count,
                                });
                            }
                        }
                    }
                    s.g += grad[i];
                    s.h += hess[i];
                    s.count += 1;
                    s.last = v;
                }
            }

            let mut next = Vec::new();
            for (open, cand) in frontier.iter().zip(&best) {
                let Some(c) = cand else { continue };
                if open.count < p.min_samples_split {
                    continue;
                }
                let (gr, hr) = (open.g - c.g_left, open.h - c.h_left);
                let left = nodes.len();
                nodes.push(Node::Leaf {
                    value: leaf_weight(c.g_left, c.h_left, p.lambda),
                });
                let right = nodes.len();
                nodes.push(Node::Leaf {
                    value: leaf_weight(gr, hr, p.lambda),
                });
                nodes[open.node] = Node::Split {
                    feature: c.feature,
                    threshold: c.threshold,
                    left,
                    right,
                };
                next.push(Open {
                    node: left,
                    g: c.g_left,
                    h: c.h_left,
                    count: c.count_left,
                });
                next.push(Open {
                    node: right,
                    g: gr,
                    h: hr,
                    count: open.count - c.count_left,
                });
            }

            // flytt rader fra noder som ble splittet på dette nivået
            for (i, row) in x.iter().enumerate() {
                if let Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } = nodes[position[i]]
                {
                    position[i] = if row[feature] < threshold { left } else { right };
                }
            }

            frontier = next;
        }

        Self { nodes }
    }

    /// CART på (x, y): g = −y og h = 1 gir bladverdi lik snittet av y.
    pub(crate) fn fit_cart(x: &[Vec<f64>], y: &[f64], growth: &Growth) -> Self {
        let sorted = SortedColumns::new(x);
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; y.len()];
        Self::grow(x, &sorted, &grad, &hess, growth)
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if row[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }
}

/// Additiv ensemble: `base + η Σ tre(x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    pub base_score: f64,
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

impl Ensemble {
    /// Boosting med kvadrert tap: g = ŷ − y, h = 1.
    pub(crate) fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        rounds: usize,
        learning_rate: f64,
        growth: &Growth,
    ) -> Self {
        let base_score = mean(y).unwrap_or(0.0);
        let sorted = SortedColumns::new(x);
        let hess = vec![1.0; y.len()];
        let mut pred = vec![base_score; y.len()];
        let mut trees = Vec::with_capacity(rounds);

        for _ in 0..rounds {
            let grad: Vec<f64> = pred.iter().zip(y).map(|(p, t)| p - t).collect();
            let tree = RegressionTree::grow(x, &sorted, &grad, &hess, growth);
            for (p, row) in pred.iter_mut().zip(x) {
                *p += learning_rate * tree.predict_row(row);
            }
            trees.push(tree);
        }

        Self {
            base_score,
            learning_rate,
            trees,
        }
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Vec<f64> {
        x.iter()
            .map(|row| {
                self.base_score
                    + self.learning_rate
                        * self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>()
            })
            .collect()
    }
}
