//! Layer flags value object
//!
//! Flags tell the platform where a layer is made available: to subsequent
//! buildpacks (`build`), to the next build of the same app (`cache`) and to
//! the launched image (`launch`).

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerFlags {
    #[serde(default)]
    pub build: bool,
    #[serde(default)]
    pub cache: bool,
    #[serde(default)]
    pub launch: bool,
}

impl LayerFlags {
    pub const NONE: Self = Self {
        build: false,
        cache: false,
        launch: false,
    };

    pub const BUILD: Self = Self {
        build: true,
        ..Self::NONE
    };

    pub const CACHE: Self = Self {
        cache: true,
        ..Self::NONE
    };

    pub const LAUNCH: Self = Self {
        launch: true,
        ..Self::NONE
    };

    pub fn union(self, other: Self) -> Self {
        Self {
            build: self.build || other.build,
            cache: self.cache || other.cache,
            launch: self.launch || other.launch,
        }
    }
}

impl BitOr for LayerFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for LayerFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.build, "build"),
            (self.cache, "cache"),
            (self.launch, "launch"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();

        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join(", "))
        }
    }
}
