//! Transmission probability between two nodes.
//!
//! ```text
//! p = min(cap, base + category_bonus + distance_weight * max(0, 1 - d / R))
//! ```
//!
//! `category_bonus` is `same_category_bonus` for identical categories,
//! `same_class_bonus` when both fall in the same [`CategoryClass`], and
//! zero otherwise. With the default constants every result lies in
//! `[0.05, 0.95]`.
//!
//! Constructed via [`InfectionModel::builder`] or [`Default`].
//!
//! [`CategoryClass`]: outbreak_core::CategoryClass

use outbreak_core::{Category, Node};

/// Default floor probability.
pub const DEFAULT_BASE: f64 = 0.05;
/// Default bonus for identical categories.
pub const DEFAULT_SAME_CATEGORY_BONUS: f64 = 0.12;
/// Default bonus for categories sharing a class.
pub const DEFAULT_SAME_CLASS_BONUS: f64 = 0.05;
/// Default weight of the linear distance term.
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.4;
/// Default hard ceiling.
pub const DEFAULT_CAP: f64 = 0.95;
/// Default connection radius.
pub const DEFAULT_RADIUS: f64 = 42.0;

/// Stateless transmission-probability function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfectionModel {
    base: f64,
    same_category_bonus: f64,
    same_class_bonus: f64,
    distance_weight: f64,
    cap: f64,
    radius: f64,
}

/// Builder for [`InfectionModel`]. Every knob starts at its default.
#[derive(Clone, Debug)]
pub struct InfectionModelBuilder {
    base: f64,
    same_category_bonus: f64,
    same_class_bonus: f64,
    distance_weight: f64,
    cap: f64,
    radius: f64,
}

impl Default for InfectionModel {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            same_category_bonus: DEFAULT_SAME_CATEGORY_BONUS,
            same_class_bonus: DEFAULT_SAME_CLASS_BONUS,
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            cap: DEFAULT_CAP,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl InfectionModel {
    /// Create a new builder with default constants.
    pub fn builder() -> InfectionModelBuilder {
        Self::default().to_builder()
    }

    /// A builder pre-loaded with this model's constants.
    pub fn to_builder(&self) -> InfectionModelBuilder {
        InfectionModelBuilder {
            base: self.base,
            same_category_bonus: self.same_category_bonus,
            same_class_bonus: self.same_class_bonus,
            distance_weight: self.distance_weight,
            cap: self.cap,
            radius: self.radius,
        }
    }

    /// The floor probability.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// The hard ceiling.
    pub fn cap(&self) -> f64 {
        self.cap
    }

    /// The connection radius at which the distance term reaches zero.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Bonus for the category pair. Symmetric in its arguments.
    pub fn category_bonus(&self, source: Category, target: Category) -> f64 {
        if source == target {
            self.same_category_bonus
        } else if source.class() == target.class() {
            self.same_class_bonus
        } else {
            0.0
        }
    }

    /// Linear distance term, `1` at distance zero and `0` at or beyond the radius.
    ///
    /// Non-finite distances contribute nothing.
    pub fn distance_factor(&self, distance: f64) -> f64 {
        (1.0 - distance / self.radius).max(0.0).min(1.0)
    }

    /// Transmission probability from `source` to `target` at `distance`.
    ///
    /// Always within `[base, cap]`.
    pub fn probability(&self, source: Category, target: Category, distance: f64) -> f64 {
        let p = self.base
            + self.category_bonus(source, target)
            + self.distance_weight * self.distance_factor(distance);
        p.min(self.cap)
    }

    /// [`probability`](Self::probability) for two nodes at their actual distance.
    pub fn between(&self, source: &Node, target: &Node) -> f64 {
        self.probability(source.category, target.category, source.distance(target))
    }
}

impl InfectionModelBuilder {
    /// Floor probability (default 0.05).
    pub fn base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Bonus for identical categories (default 0.12).
    pub fn same_category_bonus(mut self, bonus: f64) -> Self {
        self.same_category_bonus = bonus;
        self
    }

    /// Bonus for same-class categories (default 0.05).
    pub fn same_class_bonus(mut self, bonus: f64) -> Self {
        self.same_class_bonus = bonus;
        self
    }

    /// Weight of the distance term (default 0.4).
    pub fn distance_weight(mut self, weight: f64) -> Self {
        self.distance_weight = weight;
        self
    }

    /// Hard ceiling (default 0.95).
    pub fn cap(mut self, cap: f64) -> Self {
        self.cap = cap;
        self
    }

    /// Connection radius (default 42).
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Build the model, validating all constants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - any constant is NaN or infinite
    /// - `base` is outside `[0, 1]`, or `cap` outside `[base, 1]`
    /// - a bonus or the distance weight is negative
    /// - `radius` is not positive
    pub fn build(self) -> Result<InfectionModel, String> {
        let all = [
            ("base", self.base),
            ("same_category_bonus", self.same_category_bonus),
            ("same_class_bonus", self.same_class_bonus),
            ("distance_weight", self.distance_weight),
            ("cap", self.cap),
            ("radius", self.radius),
        ];
        if let Some((name, v)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite, got {v}"));
        }
        if !(0.0..=1.0).contains(&self.base) {
            return Err(format!("base must be in [0, 1], got {}", self.base));
        }
        if self.cap < self.base || self.cap > 1.0 {
            return Err(format!(
                "cap must be in [base, 1] = [{}, 1], got {}",
                self.base, self.cap
            ));
        }
        for (name, v) in &all[1..4] {
            if *v < 0.0 {
                return Err(format!("{name} must be >= 0, got {v}"));
            }
        }
        if self.radius <= 0.0 {
            return Err(format!("radius must be > 0, got {}", self.radius));
        }
        Ok(InfectionModel {
            base: self.base,
            same_category_bonus: self.same_category_bonus,
            same_class_bonus: self.same_class_bonus,
            distance_weight: self.distance_weight,
            cap: self.cap,
            radius: self.radius,
        })
    }
}
