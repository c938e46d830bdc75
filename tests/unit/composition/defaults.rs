use super::*;
use crate::composition::phase::PhaseTable;

#[test]
fn cinematic_config_is_valid() {
    let cfg = SequenceConfig::cinematic();
    cfg.validate().unwrap();
    let names: Vec<&str> = cfg.phases.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["hook", "problem", "insight", "solution", "proof", "cta"]
    );
    assert_eq!(cfg.camera.keys.len(), 6);
}

#[test]
fn cinematic_covers_the_whole_timeline() {
    let cfg = SequenceConfig::cinematic();
    let table = PhaseTable::from_defs(&cfg.phases).unwrap();
    let mut weights = vec![0.0; table.len()];
    for i in 0..=1000 {
        let p = i as f64 / 1000.0;
        table.weights_into(p, &mut weights);
        let total: f64 = weights.iter().sum();
        assert!(total > 0.5, "dark gap at progress {p}: {total}");
    }
    assert_eq!(table.weight_of("hook", 0.0), 1.0);
    assert_eq!(table.weight_of("cta", 1.0), 1.0);
}

#[test]
fn only_proof_carries_a_tour() {
    let cfg = SequenceConfig::cinematic();
    for p in &cfg.phases {
        assert_eq!(p.sub_shots.is_some(), p.name == "proof", "{}", p.name);
    }
    let tour = cfg.phases[4].sub_shots.as_ref().unwrap();
    assert_eq!(tour.shots.len(), 4);
}

#[test]
fn colors_decode_from_srgb() {
    assert_eq!(srgb(AMBER).to_hex(), "#D4A04A");
    assert_eq!(srgb(0x0A0806).to_hex(), "#0A0806");
}
