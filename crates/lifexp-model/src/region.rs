//! Closed set of regions present in the Eurostat life expectancy tables.
//!
//! Codes follow Eurostat's `geo` dimension: ISO-style two-letter codes for
//! countries and territories (with Eurostat's `EL` for Greece and `UK` for the
//! United Kingdom) plus a handful of multi-country aggregates.

use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// A country, territory or aggregate in the `geo` dimension.
///
/// Declaration order matches the order regions are listed to users, and
/// [`Region::countries`] keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Austria,
    Belgium,
    Bulgaria,
    Switzerland,
    Cyprus,
    Czechia,
    Denmark,
    Estonia,
    Greece,
    Spain,
    EuropeanUnion27From2020,
    Finland,
    France,
    Croatia,
    Hungary,
    Iceland,
    Italy,
    Liechtenstein,
    Lithuania,
    Luxembourg,
    Latvia,
    Malta,
    Netherlands,
    Norway,
    Poland,
    Portugal,
    Romania,
    Sweden,
    Slovenia,
    Slovakia,
    Germany,
    GermanyIncludingFormerGdr,
    Albania,
    EuroArea18,
    EuroArea19,
    EuropeanFreeTradeAssociation,
    Ireland,
    Montenegro,
    NorthMacedonia,
    Serbia,
    Armenia,
    Azerbaijan,
    Georgia,
    Turkey,
    Ukraine,
    Belarus,
    EuropeanEconomicArea30,
    EuropeanEconomicArea31,
    EuropeanUnion27From2007,
    EuropeanUnion28,
    UnitedKingdom,
    Kosovo,
    MetropolitanFrance,
    Moldova,
    SanMarino,
    Russia,
}

impl Region {
    /// Every region, in declaration order.
    pub const ALL: [Region; 56] = [
        Region::Austria,
        Region::Belgium,
        Region::Bulgaria,
        Region::Switzerland,
        Region::Cyprus,
        Region::Czechia,
        Region::Denmark,
        Region::Estonia,
        Region::Greece,
        Region::Spain,
        Region::EuropeanUnion27From2020,
        Region::Finland,
        Region::France,
        Region::Croatia,
        Region::Hungary,
        Region::Iceland,
        Region::Italy,
        Region::Liechtenstein,
        Region::Lithuania,
        Region::Luxembourg,
        Region::Latvia,
        Region::Malta,
        Region::Netherlands,
        Region::Norway,
        Region::Poland,
        Region::Portugal,
        Region::Romania,
        Region::Sweden,
        Region::Slovenia,
        Region::Slovakia,
        Region::Germany,
        Region::GermanyIncludingFormerGdr,
        Region::Albania,
        Region::EuroArea18,
        Region::EuroArea19,
        Region::EuropeanFreeTradeAssociation,
        Region::Ireland,
        Region::Montenegro,
        Region::NorthMacedonia,
        Region::Serbia,
        Region::Armenia,
        Region::Azerbaijan,
        Region::Georgia,
        Region::Turkey,
        Region::Ukraine,
        Region::Belarus,
        Region::EuropeanEconomicArea30,
        Region::EuropeanEconomicArea31,
        Region::EuropeanUnion27From2007,
        Region::EuropeanUnion28,
        Region::UnitedKingdom,
        Region::Kosovo,
        Region::MetropolitanFrance,
        Region::Moldova,
        Region::SanMarino,
        Region::Russia,
    ];

    /// Returns the Eurostat `geo` code (e.g. `"PT"`, `"EU27_2020"`).
    pub fn code(&self) -> &'static str {
        match self {
            Region::Austria => "AT",
            Region::Belgium => "BE",
            Region::Bulgaria => "BG",
            Region::Switzerland => "CH",
            Region::Cyprus => "CY",
            Region::Czechia => "CZ",
            Region::Denmark => "DK",
            Region::Estonia => "EE",
            Region::Greece => "EL",
            Region::Spain => "ES",
            Region::EuropeanUnion27From2020 => "EU27_2020",
            Region::Finland => "FI",
            Region::France => "FR",
            Region::Croatia => "HR",
            Region::Hungary => "HU",
            Region::Iceland => "IS",
            Region::Italy => "IT",
            Region::Liechtenstein => "LI",
            Region::Lithuania => "LT",
            Region::Luxembourg => "LU",
            Region::Latvia => "LV",
            Region::Malta => "MT",
            Region::Netherlands => "NL",
            Region::Norway => "NO",
            Region::Poland => "PL",
            Region::Portugal => "PT",
            Region::Romania => "RO",
            Region::Sweden => "SE",
            Region::Slovenia => "SI",
            Region::Slovakia => "SK",
            Region::Germany => "DE",
            Region::GermanyIncludingFormerGdr => "DE_TOT",
            Region::Albania => "AL",
            Region::EuroArea18 => "EA18",
            Region::EuroArea19 => "EA19",
            Region::EuropeanFreeTradeAssociation => "EFTA",
            Region::Ireland => "IE",
            Region::Montenegro => "ME",
            Region::NorthMacedonia => "MK",
            Region::Serbia => "RS",
            Region::Armenia => "AM",
            Region::Azerbaijan => "AZ",
            Region::Georgia => "GE",
            Region::Turkey => "TR",
            Region::Ukraine => "UA",
            Region::Belarus => "BY",
            Region::EuropeanEconomicArea30 => "EEA30_2007",
            Region::EuropeanEconomicArea31 => "EEA31",
            Region::EuropeanUnion27From2007 => "EU27_2007",
            Region::EuropeanUnion28 => "EU28",
            Region::UnitedKingdom => "UK",
            Region::Kosovo => "XK",
            Region::MetropolitanFrance => "FX",
            Region::Moldova => "MD",
            Region::SanMarino => "SM",
            Region::Russia => "RU",
        }
    }

    /// Returns the English display name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Austria => "Austria",
            Region::Belgium => "Belgium",
            Region::Bulgaria => "Bulgaria",
            Region::Switzerland => "Switzerland",
            Region::Cyprus => "Cyprus",
            Region::Czechia => "Czechia",
            Region::Denmark => "Denmark",
            Region::Estonia => "Estonia",
            Region::Greece => "Greece",
            Region::Spain => "Spain",
            Region::EuropeanUnion27From2020 => "European Union (27 countries, from 2020)",
            Region::Finland => "Finland",
            Region::France => "France",
            Region::Croatia => "Croatia",
            Region::Hungary => "Hungary",
            Region::Iceland => "Iceland",
            Region::Italy => "Italy",
            Region::Liechtenstein => "Liechtenstein",
            Region::Lithuania => "Lithuania",
            Region::Luxembourg => "Luxembourg",
            Region::Latvia => "Latvia",
            Region::Malta => "Malta",
            Region::Netherlands => "Netherlands",
            Region::Norway => "Norway",
            Region::Poland => "Poland",
            Region::Portugal => "Portugal",
            Region::Romania => "Romania",
            Region::Sweden => "Sweden",
            Region::Slovenia => "Slovenia",
            Region::Slovakia => "Slovakia",
            Region::Germany => "Germany",
            Region::GermanyIncludingFormerGdr => "Germany (including former GDR)",
            Region::Albania => "Albania",
            Region::EuroArea18 => "Euro area (18 countries)",
            Region::EuroArea19 => "Euro area (19 countries)",
            Region::EuropeanFreeTradeAssociation => "European Free Trade Association",
            Region::Ireland => "Ireland",
            Region::Montenegro => "Montenegro",
            Region::NorthMacedonia => "North Macedonia",
            Region::Serbia => "Serbia",
            Region::Armenia => "Armenia",
            Region::Azerbaijan => "Azerbaijan",
            Region::Georgia => "Georgia",
            Region::Turkey => "Turkey",
            Region::Ukraine => "Ukraine",
            Region::Belarus => "Belarus",
            Region::EuropeanEconomicArea30 => "European Economic Area (30 countries, 2007-2013)",
            Region::EuropeanEconomicArea31 => "European Economic Area (31 countries)",
            Region::EuropeanUnion27From2007 => "European Union (27 countries, 2007-2013)",
            Region::EuropeanUnion28 => "European Union (28 countries)",
            Region::UnitedKingdom => "United Kingdom",
            Region::Kosovo => "Kosovo",
            Region::MetropolitanFrance => "France (metropolitan)",
            Region::Moldova => "Moldova",
            Region::SanMarino => "San Marino",
            Region::Russia => "Russia",
        }
    }

    /// Returns true for multi-country groupings and statistical variants
    /// that are not a single country.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Region::EuropeanUnion27From2020
                | Region::GermanyIncludingFormerGdr
                | Region::EuroArea18
                | Region::EuroArea19
                | Region::EuropeanFreeTradeAssociation
                | Region::EuropeanEconomicArea30
                | Region::EuropeanEconomicArea31
                | Region::EuropeanUnion27From2007
                | Region::EuropeanUnion28
                | Region::MetropolitanFrance
        )
    }

    /// Real countries and territories only, in declaration order.
    pub fn countries() -> Vec<Region> {
        Self::ALL
            .iter()
            .copied()
            .filter(|region| !region.is_aggregate())
            .collect()
    }

    /// Aggregate codes only, in declaration order.
    pub fn aggregates() -> Vec<Region> {
        Self::ALL
            .iter()
            .copied()
            .filter(Region::is_aggregate)
            .collect()
    }

    /// Looks up a region by its exact, case-sensitive code.
    pub fn from_code(code: &str) -> Option<Region> {
        Self::ALL.iter().copied().find(|region| region.code() == code)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_code(s).ok_or_else(|| PipelineError::UnknownRegion {
            code: s.to_string(),
        })
    }
}
