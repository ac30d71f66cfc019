use super::signals;
use crate::models::{ForecastSnapshot, HistorySnapshot, SiteParameters};

/// Soil moisture (percent) at or below which irrigation is forced.
pub const SOIL_MOISTURE_LOWER: f64 = 30.0;
/// Soil moisture (percent) at or above which irrigation is forbidden.
pub const SOIL_MOISTURE_UPPER: f64 = 80.0;
/// Fraction of the barrel allocated per irrigation cycle; the rest is
/// held back as reserve.
pub const BARREL_BUFFER: f64 = 0.5;

/// Irrigation decision engine for one site.
///
/// Holds one current+forecast snapshot and one historical snapshot, both
/// supplied by the caller, and answers two questions: sprinkle now, and for
/// how long. Stateless beyond its inputs; built fresh per request.
pub struct SprinklerEngine {
    site: SiteParameters,
    forecast: ForecastSnapshot,
    history: HistorySnapshot,
}

impl SprinklerEngine {
    pub fn new(site: SiteParameters, forecast: ForecastSnapshot, history: HistorySnapshot) -> Self {
        Self {
            site,
            forecast,
            history,
        }
    }

    pub fn rains_today(&self) -> bool {
        signals::rains_today(&self.forecast)
    }

    pub fn rains_tomorrow(&self) -> bool {
        signals::rains_tomorrow(&self.forecast)
    }

    pub fn rained_yesterday(&self) -> bool {
        signals::rained_yesterday(&self.history)
    }

    pub fn days_to_next_rain(&self) -> u32 {
        signals::days_to_next_rain(&self.forecast)
    }

    /// Decide whether to sprinkle now.
    ///
    /// Precedence, first match wins:
    /// 1. rain observed right now forbids irrigation,
    /// 2. soil moisture, when reported, forces irrigation at or below the
    ///    lower bound and forbids it at or above the upper bound,
    /// 3. rain yesterday or rain tomorrow forbids irrigation,
    /// 4. otherwise sprinkle.
    ///
    /// The ordering is load-bearing: saturated soil must override the
    /// history/forecast checks, and today's rain overrides everything.
    pub fn should_sprinkle_now(&self) -> bool {
        if self.rains_today() {
            return false;
        }

        if let Some(moisture) = self.site.soil_moisture {
            if moisture <= SOIL_MOISTURE_LOWER {
                return true;
            }
            if moisture >= SOIL_MOISTURE_UPPER {
                return false;
            }
        }

        if self.rained_yesterday() {
            return false;
        }

        if self.rains_tomorrow() {
            return false;
        }

        true
    }

    /// Sprinkle duration in seconds, assuming the caller decided to water.
    ///
    /// Half the barrel (the buffer fraction) is spread evenly over the days
    /// until the next expected rain, then converted from liters to pump
    /// hours to seconds. Returns 0.0 when barrel volume or pump output is
    /// not configured; duration needs both hardware parameters.
    ///
    /// No rain-gating happens here: this answers "how long if we water",
    /// independent of [`Self::should_sprinkle_now`].
    pub fn sprinkle_seconds(&self) -> f64 {
        let (Some(volume), Some(pump_output)) = (self.site.barrel_volume, self.site.pump_output)
        else {
            return 0.0;
        };

        // days_to_next_rain is >= 1 by construction; clamp anyway.
        let days = self.days_to_next_rain().max(1) as f64;
        ((volume * BARREL_BUFFER) / days) / pump_output * 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RainField, WeatherEntry};

    fn rainy() -> WeatherEntry {
        WeatherEntry {
            rain: Some(RainField::PerHour(0.3)),
        }
    }

    fn dry() -> WeatherEntry {
        WeatherEntry::default()
    }

    fn engine(
        soil_moisture: Option<f64>,
        forecast: ForecastSnapshot,
        history: HistorySnapshot,
    ) -> SprinklerEngine {
        let site = SiteParameters::new(39.83, -75.87).with_soil_moisture(soil_moisture);
        SprinklerEngine::new(site, forecast, history)
    }

    fn rain_today_forecast() -> ForecastSnapshot {
        ForecastSnapshot {
            current: Some(rainy()),
            daily: vec![],
        }
    }

    fn rainy_yesterday_history() -> HistorySnapshot {
        HistorySnapshot {
            hourly: vec![rainy(), rainy(), dry()],
        }
    }

    #[test]
    fn rain_today_overrides_everything() {
        // Even bone-dry soil must not trigger sprinkling while it rains.
        let e = engine(
            Some(20.0),
            rain_today_forecast(),
            HistorySnapshot::default(),
        );
        assert!(!e.should_sprinkle_now());
    }

    #[test]
    fn dry_soil_forces_sprinkling_despite_rain_history_and_forecast() {
        let forecast = ForecastSnapshot {
            current: None,
            daily: vec![rainy()],
        };
        let e = engine(Some(20.0), forecast, rainy_yesterday_history());
        assert!(e.should_sprinkle_now());
    }

    #[test]
    fn saturated_soil_forbids_sprinkling() {
        let e = engine(
            Some(90.0),
            ForecastSnapshot::default(),
            HistorySnapshot::default(),
        );
        assert!(!e.should_sprinkle_now());
    }

    #[test]
    fn moisture_bounds_are_inclusive() {
        let dry_defaults = || (ForecastSnapshot::default(), HistorySnapshot::default());

        let (f, h) = dry_defaults();
        assert!(engine(Some(30.0), f, h).should_sprinkle_now());

        let (f, h) = dry_defaults();
        assert!(!engine(Some(80.0), f, h).should_sprinkle_now());
    }

    #[test]
    fn moisture_between_bounds_falls_through_to_rain_signals() {
        let e = engine(
            Some(50.0),
            ForecastSnapshot::default(),
            rainy_yesterday_history(),
        );
        assert!(!e.should_sprinkle_now());

        let forecast = ForecastSnapshot {
            current: None,
            daily: vec![rainy()],
        };
        let e = engine(Some(50.0), forecast, HistorySnapshot::default());
        assert!(!e.should_sprinkle_now());

        let e = engine(
            Some(50.0),
            ForecastSnapshot::default(),
            HistorySnapshot::default(),
        );
        assert!(e.should_sprinkle_now());
    }

    #[test]
    fn no_moisture_reading_uses_rain_signals_only() {
        let e = engine(None, ForecastSnapshot::default(), HistorySnapshot::default());
        assert!(e.should_sprinkle_now());

        let e = engine(None, ForecastSnapshot::default(), rainy_yesterday_history());
        assert!(!e.should_sprinkle_now());
    }

    #[test]
    fn single_rainy_hour_yesterday_does_not_block_sprinkling() {
        let history = HistorySnapshot {
            hourly: vec![rainy(), dry(), dry()],
        };
        let e = engine(None, ForecastSnapshot::default(), history);
        assert!(e.should_sprinkle_now());
    }

    #[test]
    fn sprinkle_seconds_spreads_half_barrel_until_next_rain() {
        // 100 L barrel, 10 L/h pump, rain on day 2:
        // ((100 * 0.5) / 2) / 10 * 3600 = 9000 s
        let site = SiteParameters::new(39.83, -75.87).with_barrel(100.0, 10.0);
        let forecast = ForecastSnapshot {
            current: None,
            daily: vec![dry(), rainy()],
        };
        let e = SprinklerEngine::new(site, forecast, HistorySnapshot::default());
        assert_eq!(e.sprinkle_seconds(), 9000.0);
    }

    #[test]
    fn sprinkle_seconds_uses_week_fallback_without_forecast_rain() {
        let site = SiteParameters::new(39.83, -75.87).with_barrel(140.0, 10.0);
        let e = SprinklerEngine::new(
            site,
            ForecastSnapshot::default(),
            HistorySnapshot::default(),
        );
        // ((140 * 0.5) / 7) / 10 * 3600 = 3600 s
        assert_eq!(e.sprinkle_seconds(), 3600.0);
    }

    #[test]
    fn sprinkle_seconds_is_zero_without_hardware_parameters() {
        let base = SiteParameters::new(39.83, -75.87);

        let mut only_barrel = base;
        only_barrel.barrel_volume = Some(100.0);

        let mut only_pump = base;
        only_pump.pump_output = Some(10.0);

        for site in [base, only_barrel, only_pump] {
            let e = SprinklerEngine::new(
                site,
                ForecastSnapshot::default(),
                HistorySnapshot::default(),
            );
            assert_eq!(e.sprinkle_seconds(), 0.0);
        }
    }

    #[test]
    fn sprinkle_seconds_ignores_rain_gating() {
        // Raining right now: the decision says no, but the duration math
        // still answers "how long if we water".
        let site = SiteParameters::new(39.83, -75.87).with_barrel(100.0, 10.0);
        let e = SprinklerEngine::new(
            site,
            rain_today_forecast(),
            HistorySnapshot::default(),
        );
        assert!(!e.should_sprinkle_now());
        assert!(e.sprinkle_seconds() > 0.0);
    }

    #[test]
    fn empty_snapshots_flow_through_both_operations() {
        let site = SiteParameters::new(0.0, 0.0);
        let e = SprinklerEngine::new(
            site,
            ForecastSnapshot::default(),
            HistorySnapshot::default(),
        );
        assert!(e.should_sprinkle_now());
        assert_eq!(e.sprinkle_seconds(), 0.0);
        assert_eq!(e.days_to_next_rain(), 7);
    }
}
