use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::error::DashboardError;

/// Wspólny interfejs dla zamkniętych list wyboru w formularzu.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];
    const KIND: &'static str;

    fn label(self) -> &'static str;

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn parse_choice(s: &str) -> Result<Self, DashboardError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::UnknownSelection {
                kind: Self::KIND,
                value: s.to_string(),
            })
    }
}

macro_rules! choice_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const KIND: &'static str = $kind;

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DashboardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_choice(s)
            }
        }
    };
}

choice_enum!(Country, "country", { Usa => "USA", China => "China" });
choice_enum!(Gender, "gender", { Male => "Male", Female => "Female" });
choice_enum!(Metric, "metric", { Height => "Height", Weight => "Weight" });
choice_enum!(Source, "source", { Gci => "GCI", Nps => "NPS", Tgw => "TGW" });
choice_enum!(Brand, "brand", {
    Defender => "Defender",
    Jaguar => "Jaguar",
    Discovery => "Discovery",
    RangeRover => "Range Rover",
});

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 100;
pub const DEFAULT_AGE: u32 = 30;

pub const TEMPERATURE_FILE: &str = "min_max_temp_data.csv";

impl Country {
    pub fn file_key(self) -> &'static str {
        match self {
            Country::Usa => "usa",
            Country::China => "china",
        }
    }
}

impl Gender {
    pub fn file_key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl Source {
    pub fn file_key(self) -> &'static str {
        match self {
            Source::Gci => "gci",
            Source::Nps => "nps",
            Source::Tgw => "tgw",
        }
    }
}

/// `usa_male_Height.csv`
pub fn reference_file_name(country: Country, gender: Gender, metric: Metric) -> String {
    format!("{}_{}_{}.csv", country.file_key(), gender.file_key(), metric.label())
}

/// `gci_usa.csv`
pub fn issues_file_name(source: Source, country: Country) -> String {
    format!("{}_{}.csv", source.file_key(), country.file_key())
}

/// Komplet parametrów jednego przebiegu raportu.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    pub country: Country,
    pub age: u32,
    pub gender: Gender,
    pub brand: Brand,
    pub source: Source,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            country: Country::Usa,
            age: DEFAULT_AGE,
            gender: Gender::Male,
            brand: Brand::Defender,
            source: Source::Gci,
        }
    }
}

pub fn clamp_age(age: u32) -> u32 {
    age.clamp(MIN_AGE, MAX_AGE)
}
