// scenarios.rs - End-to-end runs through the public engine API

use life_engine::{Engine, MatrixData, Rect, RleError, patterns, rle};

#[test]
fn glider_through_rle_and_one_step() {
    let glider = patterns::find("Glider").unwrap().grid().unwrap();
    let text = rle::encode(&glider);
    assert_eq!(text, "bo$2bo$3o!");

    let mut engine = Engine::new(20, 20);
    let imported = engine.import_rle(&text, 3, 3).unwrap();
    assert!(engine.place_pattern(5, 5, &imported));
    engine.step(false);

    let mut alive: Vec<_> = engine.current().alive_cells().collect();
    alive.sort();
    // o.o
    // .oo
    // .o.
    assert_eq!(alive, vec![(5, 6), (6, 7), (6, 8), (7, 6), (7, 7)]);

    let phase = engine.extract_selection(Rect::from_corners((5, 6), (7, 8))).unwrap();
    assert_eq!(rle::encode(&phase), "obo$b2o$bo!");
}

#[test]
fn reference_grids_decode() {
    let blank = rle::decode("$$$$$$$$$!", 10, 10).unwrap();
    assert_eq!(blank.population(), 0);
    assert_eq!(rle::encode(&blank), "$$$$$$$$$!");

    let full = rle::decode(&format!("{}!", vec!["10o"; 10].join("$")), 10, 10).unwrap();
    assert_eq!(full.population(), 100);

    assert_eq!(
        rle::decode("3z$!", 10, 10),
        Err(RleError::MalformedRle { ch: 'z', x: 3, y: 0 })
    );
}

#[test]
fn toroidal_glider_returns_home() {
    // On an 8x8 torus a glider travels one cell diagonally every 4
    // generations and is back where it started after 32.
    let mut engine = Engine::new(8, 8);
    let glider = patterns::find("Glider").unwrap().grid().unwrap();
    assert!(engine.place_pattern(0, 0, &glider));
    let start = engine.current().clone();
    for _ in 0..32 {
        engine.step(true);
    }
    assert_eq!(engine.current(), &start);
    assert_eq!(engine.population(), 5);
}

#[test]
fn saved_record_survives_file_layout() {
    let mut engine = Engine::new(40, 12);
    let gun = patterns::find("Gosper Glider Gun").unwrap().grid().unwrap();
    assert!(engine.place_pattern(2, 1, &gun));
    engine.set_rule("B3/S23").unwrap();

    let record = engine.save("Gun Field");
    let text = record.to_rle_file();
    assert!(text.starts_with("#N Gun Field\nx = 40, y = 12, rule = B3/S23\n"));

    let restored = MatrixData::from_rle_file(&text).unwrap();
    let mut other = Engine::new(1, 1);
    other.load_record(&restored).unwrap();
    assert_eq!(other.current(), engine.current());
    assert_eq!(restored.file_name(), "gunfield.rle");
}
