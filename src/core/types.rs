use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64, timestamp_to_unix_millis};
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One magnitude/direction bucket of price displacement at a single scale.
///
/// `value` carries both magnitude (`abs`) and direction (sign). `high`/`low`
/// are the absolute price bounds of the box and are only consumed by
/// price-axis renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBox {
    pub high: f64,
    pub low: f64,
    pub value: f64,
}

impl PriceBox {
    /// Builds a validated box.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    pub fn new(high: f64, low: f64, value: f64) -> TimelineResult<Self> {
        let candidate = Self { high, low, value };
        candidate.check().map_err(|reason| {
            TimelineError::InvalidData(format!("invalid box: {reason}"))
        })?;
        Ok(candidate)
    }

    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.value.abs()
    }

    /// Zero counts as positive so it groups with the bullish side.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.value >= 0.0
    }

    #[must_use]
    pub fn with_value(self, value: f64) -> Self {
        Self { value, ..self }
    }

    fn check(self) -> Result<(), &'static str> {
        if !self.high.is_finite() || !self.low.is_finite() || !self.value.is_finite() {
            return Err("box values must be finite");
        }
        if self.low > self.high {
            return Err("box low must be <= high");
        }
        Ok(())
    }
}

/// Synthetic in-flight OHLC maintained on the tail slice by live ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentOhlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub last_tick_millis: i64,
}

impl CurrentOhlc {
    #[must_use]
    pub fn from_tick(tick: &Tick) -> Self {
        Self {
            open: tick.price,
            high: tick.high.unwrap_or(tick.price).max(tick.price),
            low: tick.low.unwrap_or(tick.price).min(tick.price),
            close: tick.price,
            last_tick_millis: tick.timestamp,
        }
    }

    pub fn absorb(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.high.unwrap_or(tick.price)).max(tick.price);
        self.low = self.low.min(tick.low.unwrap_or(tick.price)).min(tick.price);
        self.close = tick.price;
        self.last_tick_millis = tick.timestamp;
    }
}

/// Timestamped set of boxes: one point on the timeline.
///
/// `boxes` keeps the upstream scale order; nothing downstream relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSlice {
    pub timestamp: String,
    pub boxes: Vec<PriceBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ohlc: Option<CurrentOhlc>,
}

impl BoxSlice {
    #[must_use]
    pub fn new(timestamp: impl Into<String>, boxes: Vec<PriceBox>) -> Self {
        Self {
            timestamp: timestamp.into(),
            boxes,
            current_ohlc: None,
        }
    }

    /// Checks every box invariant, reporting the first offending index.
    pub fn validate(&self) -> TimelineResult<()> {
        for (index, price_box) in self.boxes.iter().enumerate() {
            if let Err(reason) = price_box.check() {
                return Err(TimelineError::MalformedSlice {
                    timestamp: self.timestamp.clone(),
                    reason: format!("box {index}: {reason}"),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        timestamp_to_unix_millis(&self.timestamp)
    }

    /// Two slices share a shape when they describe the same timeline point
    /// with the same number of scales.
    #[must_use]
    pub fn same_shape(&self, other: &BoxSlice) -> bool {
        self.timestamp == other.timestamp && self.boxes.len() == other.boxes.len()
    }
}

/// Live price update keyed by pair symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub pair: String,
    pub price: f64,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Tick {
    #[must_use]
    pub fn new(pair: impl Into<String>, price: f64, timestamp: i64) -> Self {
        Self {
            pair: pair.into(),
            price,
            high: None,
            low: None,
            timestamp,
            volume: None,
        }
    }

    /// Converts an exact decimal price and UTC time into a tick.
    pub fn from_decimal(
        pair: impl Into<String>,
        price: Decimal,
        time: DateTime<Utc>,
    ) -> TimelineResult<Self> {
        Ok(Self::new(
            pair,
            decimal_to_f64(price, "price")?,
            datetime_to_unix_millis(time),
        ))
    }

    #[must_use]
    pub fn with_range(mut self, high: f64, low: f64) -> Self {
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.price.is_finite() {
            return Err(TimelineError::InvalidData(
                "tick price must be finite".to_owned(),
            ));
        }
        for (field, value) in [("high", self.high), ("low", self.low)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(TimelineError::InvalidData(format!(
                    "tick {field} must be finite when present"
                )));
            }
        }
        Ok(())
    }
}
