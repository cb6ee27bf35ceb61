use std::convert::TryFrom;

/// Forecast time window offered by the real-time weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    TwoHour,
    TwentyFourHour,
    FourDay,
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::TwoHour => "2h",
            Horizon::TwentyFourHour => "24h",
            Horizon::FourDay => "96h",
        }
    }

    pub const fn all() -> &'static [Horizon] {
        &[Horizon::TwoHour, Horizon::TwentyFourHour, Horizon::FourDay]
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Horizon {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "2h" => Ok(Horizon::TwoHour),
            "24h" => Ok(Horizon::TwentyFourHour),
            "96h" | "4day" => Ok(Horizon::FourDay),
            _ => Err(anyhow::anyhow!(
                "Unknown task '{value}'. Supported tasks: 2h, 24h, 96h."
            )),
        }
    }
}
