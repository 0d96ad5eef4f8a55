//! Icon palette: the named marks players choose from.

use super::types::Mark;
use crate::rng::{shuffle, RandomSource};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

/// Number of icons the random draw adds to X and O by default.
pub const DEFAULT_RANDOM_ICONS: usize = 6;

/// A drawable icon.
///
/// Variants other than X and O are named after what they depict.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Icon {
    /// Classic cross.
    X,
    /// Classic nought.
    #[strum(to_string = "O")]
    Circle,
    Dog,
    Cat,
    Fish,
    Bird,
    Flower,
    Tree,
    Snowflake,
    Sun,
    Cloud,
    Star,
    Trophy,
    Bath,
    Heart,
    Music,
    /// Game controller.
    #[strum(to_string = "Game")]
    Gamepad,
    Rocket,
    Pizza,
    Coffee,
    Bike,
    Car,
    Plane,
    Gift,
    Crown,
    Diamond,
}

impl Icon {
    /// Icons present in every palette, in order.
    pub const BASE: [Icon; 2] = [Icon::X, Icon::Circle];

    /// Icons eligible for the random draw.
    pub fn pool() -> impl Iterator<Item = Icon> {
        Icon::iter().filter(|icon| !Self::BASE.contains(icon))
    }
}

/// The icons available in one game; a [`Mark`] indexes into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPalette {
    icons: Vec<Icon>,
}

impl IconPalette {
    /// X and O followed by `random_icons` icons drawn from the shuffled pool.
    ///
    /// `random_icons` is capped at the pool size.
    #[instrument(skip(rng))]
    pub fn generate(rng: &mut (impl RandomSource + ?Sized), random_icons: usize) -> Self {
        let mut pool: Vec<Icon> = Icon::pool().collect();
        shuffle(rng, &mut pool);
        pool.truncate(random_icons);

        let icons: Vec<Icon> = Icon::BASE.into_iter().chain(pool).collect();
        debug!(?icons, "Generated icon palette");
        Self { icons }
    }

    /// Palette of just X and O.
    pub fn classic() -> Self {
        Self {
            icons: Icon::BASE.to_vec(),
        }
    }

    /// Number of icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// True if the palette holds no icons.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// True if `mark` refers to an icon in this palette.
    pub fn contains(&self, mark: Mark) -> bool {
        mark.index() < self.icons.len()
    }

    /// The icon a mark stands for.
    pub fn icon(&self, mark: Mark) -> Option<Icon> {
        self.icons.get(mark.index()).copied()
    }

    /// Display name of a mark, falling back to its raw id.
    pub fn name(&self, mark: Mark) -> String {
        self.icon(mark)
            .map(|icon| icon.to_string())
            .unwrap_or_else(|| mark.to_string())
    }

    /// Every mark in the palette, in order.
    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        (0..self.icons.len()).filter_map(|i| u8::try_from(i).ok().map(Mark))
    }

    /// Icons in palette order.
    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }
}

impl Default for IconPalette {
    fn default() -> Self {
        Self::classic()
    }
}
