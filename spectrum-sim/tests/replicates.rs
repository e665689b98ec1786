use spectrum_sim::reference_spectra::ReferenceShape;
use spectrum_sim::settings::{SettingsError, MAX_SEED};
use spectrum_sim::{
    generate_replicates, replicate_seed, AcquisitionContext, BaseSpectrumContribution,
    SamplingStrategy, SpectrumSynthesizer, SynthesisSettings,
};
use tempfile::TempDir;

fn photopeak_setup() -> (AcquisitionContext, Vec<BaseSpectrumContribution>) {
    let context = AcquisitionContext::from_secs_f64(30.0, 256).unwrap();
    let peak = BaseSpectrumContribution::new(ReferenceShape::Photopeak.build(256), 0.2, 50.0)
        .unwrap();
    let background = BaseSpectrumContribution::new(vec![1.0; 256], 1.0, 20.0).unwrap();
    (context, vec![peak, background])
}

#[test]
fn test_parallel_matches_serial() {
    let (context, contributions) = photopeak_setup();

    for strategy in SamplingStrategy::ALL {
        let synthesizer = SpectrumSynthesizer::new(strategy);
        let parallel =
            generate_replicates(&synthesizer, &context, &contributions, Some(500), 16, true)
                .unwrap();
        let serial =
            generate_replicates(&synthesizer, &context, &contributions, Some(500), 16, false)
                .unwrap();

        assert_eq!(parallel, serial, "{strategy}");
        assert_eq!(parallel.len(), 16);
        assert_eq!(parallel.base_seed, 500);
        assert_eq!(parallel.strategy, strategy);
    }
}

#[test]
fn test_replicate_matches_direct_call() {
    let (context, contributions) = photopeak_setup();
    let synthesizer = SpectrumSynthesizer::new(SamplingStrategy::Rejection);
    let base_seed = 1_000;

    let batch =
        generate_replicates(&synthesizer, &context, &contributions, Some(base_seed), 8, true)
            .unwrap();

    for (index, spectrum) in batch.spectra.iter().enumerate() {
        let direct = synthesizer
            .synthesize(&context, &contributions, Some(replicate_seed(base_seed, index)))
            .unwrap();
        assert_eq!(spectrum, &direct, "replicate {index}");
    }
}

#[test]
fn test_unseeded_batch_records_its_seed() {
    let (context, contributions) = photopeak_setup();
    let synthesizer = SpectrumSynthesizer::default();

    let batch = generate_replicates(&synthesizer, &context, &contributions, None, 4, true).unwrap();
    let replay = generate_replicates(
        &synthesizer,
        &context,
        &contributions,
        Some(batch.base_seed),
        4,
        false,
    )
    .unwrap();

    assert_eq!(batch, replay);
}

#[test]
fn test_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("synthesis.json");

    let settings = SynthesisSettings::with_fixed_seed(SamplingStrategy::Rejection, 12_345).unwrap();
    settings.save(&path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"rejection\""));

    let loaded = SynthesisSettings::load(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.run_seed(), 12_345);
}

#[test]
fn test_settings_drive_reproducible_runs() {
    let (context, contributions) = photopeak_setup();
    let settings = SynthesisSettings::with_fixed_seed(SamplingStrategy::Poisson, 77).unwrap();

    let first = settings
        .synthesizer()
        .synthesize(&context, &contributions, Some(settings.run_seed()))
        .unwrap();
    let second = SamplingStrategy::Poisson
        .synthesize(&context, &contributions, Some(77))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_settings_load_rejects_bad_files() {
    let dir = TempDir::new().unwrap();

    let out_of_range = dir.path().join("out_of_range.json");
    std::fs::write(
        &out_of_range,
        format!(
            r#"{{"sampling_strategy": "poisson", "random_seed": {}, "random_seed_fixed": true}}"#,
            MAX_SEED + 1
        ),
    )
    .unwrap();
    assert!(matches!(
        SynthesisSettings::load(&out_of_range),
        Err(SettingsError::SeedOutOfRange(_))
    ));

    let unknown_strategy = dir.path().join("unknown.json");
    std::fs::write(&unknown_strategy, r#"{"sampling_strategy": "gibbs"}"#).unwrap();
    assert!(matches!(
        SynthesisSettings::load(&unknown_strategy),
        Err(SettingsError::Json(_))
    ));

    assert!(matches!(
        SynthesisSettings::load(&dir.path().join("missing.json")),
        Err(SettingsError::Io(_))
    ));
}
