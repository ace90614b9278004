use serde::Serialize;

pub const KCAL_PER_KG_FAT: f64 = 7700.0;
pub const COLA_CAN_KCAL: f64 = 140.0;
pub const PIZZA_SLICE_KCAL: f64 = 285.0;
pub const CHOCOLATE_BAR_KCAL: f64 = 230.0;

/// Forbrente kalorier uttrykt i mer håndfaste enheter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurnEquivalents {
    pub fat_kg: f64,
    pub cola_cans: f64,
    pub pizza_slices: f64,
    pub chocolate_bars: f64,
}

impl BurnEquivalents {
    pub fn from_kcal(kcal: i64) -> Self {
        let k = kcal as f64;
        Self {
            fat_kg: k / KCAL_PER_KG_FAT,
            cola_cans: k / COLA_CAN_KCAL,
            pizza_slices: k / PIZZA_SLICE_KCAL,
            chocolate_bars: k / CHOCOLATE_BAR_KCAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effort {
    Excellent,
    Great,
    GoodStart,
}

impl Effort {
    /// Terskler: over 500 og over 300 kcal.
    pub fn from_kcal(kcal: i64) -> Self {
        if kcal > 500 {
            Effort::Excellent
        } else if kcal > 300 {
            Effort::Great
        } else {
            Effort::GoodStart
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Effort::Excellent => "Excellent workout! You're crushing your fitness goals! 💪",
            Effort::Great => "Great session! Keep up the good work! 👍",
            Effort::GoodStart => "Good start! Every calorie counts toward your health journey. 🌱",
        }
    }
}
