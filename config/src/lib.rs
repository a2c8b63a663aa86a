//! Configuration types shared between the fftconv crates.

mod conv;
mod types;

pub use conv::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorization_products() {
        assert_eq!(Factorization::N256.transform_size(), 256);
        assert_eq!(Factorization::N4096.transform_size(), 4096);
        assert_eq!(Factorization::N16384.transform_size(), 16384);
        for f in Factorization::all() {
            assert_eq!(
                f.radices().iter().product::<usize>(),
                f.transform_size(),
                "{f}"
            );
        }
    }

    #[test]
    fn test_factorization_from_str() {
        assert_eq!("16x16".parse::<Factorization>().unwrap(), Factorization::N256);
        assert_eq!("256".parse::<Factorization>().unwrap(), Factorization::N256);
        assert_eq!(
            "16x32x32".parse::<Factorization>().unwrap(),
            Factorization::N16384
        );
        assert_eq!(
            "16384".parse::<Factorization>().unwrap(),
            Factorization::N16384
        );
        assert!("8x8".parse::<Factorization>().is_err());
    }

    #[test]
    fn test_factorization_serde() {
        assert_eq!(
            serde_json::from_str::<Factorization>("\"16x16x16\"").unwrap(),
            Factorization::N4096
        );
        let json = serde_json::to_string(&Factorization::N16384).unwrap();
        assert_eq!(json, "\"16x32x32\"");
    }

    #[test]
    fn test_unsupported_length_lookup() {
        assert_eq!(Factorization::for_transform_size(256), Some(Factorization::N256));
        assert_eq!(Factorization::for_transform_size(512), None);
        assert_eq!(Factorization::for_transform_size(0), None);
    }

    #[test]
    fn test_config_from_raw_length() {
        let config = FftConvConfig::for_transform_size(4096, 2, 2).unwrap();
        assert_eq!(config.factorization, Factorization::N4096);
        assert_eq!(
            FftConvConfig::for_transform_size(1024, 2, 2),
            Err(ConfigError::UnsupportedTransformSize { n: 1024 })
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        for f in Factorization::all() {
            let config = FftConvConfig::new(f, 4, 6);
            config.validate().unwrap_or_else(|e| panic!("{f}: {e}"));
        }
    }

    #[test]
    fn test_config_picks_dividing_tiles() {
        let config = FftConvConfig::new(Factorization::N256, 6, 3);
        assert_eq!(config.batch % config.batch_tile, 0);
        assert_eq!(config.channels % config.channel_tile, 0);
        assert_eq!(config.grid(), (6 / config.batch_tile, 3 / config.channel_tile));
    }

    #[test]
    fn test_signal_size_mismatch_rejected() {
        let mut config = FftConvConfig::new(Factorization::N256, 1, 1);
        config.signal_size = 255;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SignalSizeMismatch {
                signal_size: 255,
                n: 256
            })
        );
    }

    #[test]
    fn test_indivisible_tiles_rejected() {
        let config = FftConvConfig::new(Factorization::N256, 4, 4).with_tiles(3, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TileIndivisible { dim: "batch", .. })
        ));
        let config = FftConvConfig::new(Factorization::N256, 4, 4).with_tiles(1, 3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TileIndivisible { dim: "channels", .. })
        ));
    }

    #[test]
    fn test_bad_lane_counts_rejected() {
        let config = FftConvConfig::new(Factorization::N256, 1, 1).with_lanes(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDim { dim: "lanes" }));
        let config = FftConvConfig::new(Factorization::N256, 1, 1).with_lanes(96);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LaneIndivisible { .. })
        ));
        let config = FftConvConfig::new(Factorization::N256, 1, 1).with_lanes(512);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LaneIndivisible { .. })
        ));
    }

    #[test]
    fn test_scratch_fits_budget_for_presets() {
        for f in Factorization::all() {
            let config = FftConvConfig::new(f, 1, 1);
            assert!(
                config.scratch_complex_elems() <= SCRATCH_BUDGET_ELEMS,
                "{f}: {} > {SCRATCH_BUDGET_ELEMS}",
                config.scratch_complex_elems()
            );
        }
    }
}
