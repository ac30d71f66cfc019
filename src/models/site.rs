use serde::{Deserialize, Serialize};

/// Physical parameters of an irrigation site.
///
/// The three hardware/sensor values are independently optional: a site may
/// report soil moisture without having a barrel, or vice versa. Unset is
/// distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteParameters {
    pub latitude: f64,
    pub longitude: f64,
    /// Soil moisture in percent (0-100).
    pub soil_moisture: Option<f64>,
    /// Rain barrel volume in liters.
    pub barrel_volume: Option<f64>,
    /// Pump output in liters per hour.
    pub pump_output: Option<f64>,
}

impl SiteParameters {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            soil_moisture: None,
            barrel_volume: None,
            pump_output: None,
        }
    }

    pub fn with_soil_moisture(mut self, percent: Option<f64>) -> Self {
        self.soil_moisture = percent;
        self
    }

    pub fn with_barrel(mut self, volume_l: f64, pump_output_lph: f64) -> Self {
        self.barrel_volume = Some(volume_l);
        self.pump_output = Some(pump_output_lph);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_leaves_unset_parameters_none() {
        let site = SiteParameters::new(39.83, -75.87);
        assert!(site.soil_moisture.is_none());
        assert!(site.barrel_volume.is_none());
        assert!(site.pump_output.is_none());

        let site = site.with_soil_moisture(Some(45.0));
        assert_eq!(site.soil_moisture, Some(45.0));
        assert!(site.barrel_volume.is_none());
    }
}
