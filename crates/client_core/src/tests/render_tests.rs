use super::*;
use crate::page::PageModel;
use serde_json::json;
use shared::domain::ModelId;

fn decode(shape: ResponseShape, body: serde_json::Value) -> PredictionResult {
    shape.decode(body).expect("decode")
}

fn scalar_body() -> serde_json::Value {
    json!({
        "pathloss": 142.3,
        "model": "Okumura-Hata",
        "parameters": {
            "environment": "urban",
            "frequency": 900,
            "distance": 5,
            "tx_height": 30,
            "rx_height": 1.5
        }
    })
}

fn batch_body() -> serde_json::Value {
    json!({
        "model": "SUI",
        "environment": "Suburban",
        "summary": {
            "total_calculations": 3,
            "min_pathloss": 120.1,
            "max_pathloss": 130.4,
            "avg_pathloss": 125.2,
            "pathloss_range": 10.3
        },
        "results": [
            { "frequency": 2000, "distance": 1, "tx_height": 30, "rx_height": 2,
              "pathloss": 130.4, "fspl": 98.47, "additional_loss": 31.93 },
            { "frequency": 2000, "distance": 0.5, "tx_height": 30, "rx_height": 2,
              "pathloss": 120.1, "fspl": 92.45, "additional_loss": 27.65 },
            { "frequency": 2000, "distance": 0.75, "tx_height": 30, "rx_height": 2,
              "pathloss": 125.2, "fspl": 95.97, "additional_loss": 29.23 }
        ]
    })
}

#[test]
fn scalar_result_is_shown_as_delivered() {
    let mut page = PageModel::new(&ModelId::ALL);
    let renderer = Renderer::new(ResponseShape::Scalar);

    renderer
        .render(&decode(ResponseShape::Scalar, scalar_body()), &mut page)
        .expect("render");

    assert_eq!(page.text(ElementId::PathlossValue), Some("142.3"));
    assert_eq!(page.text(ElementId::UsedModel), Some("Okumura-Hata"));
    assert_eq!(page.text(ElementId::UsedEnvironment), Some("urban"));
    assert_eq!(
        page.list(ElementId::ParametersList),
        &[
            "Frequency: 900 MHz".to_string(),
            "Distance: 5 km".to_string(),
            "TX Height: 30 m".to_string(),
            "RX Height: 1.5 m".to_string(),
        ]
    );
    assert!(page.is_visible(Region::Results));
    assert_eq!(page.scrolls(), &[Region::Results]);
}

#[test]
fn breakdown_rounds_losses_and_appends_unit() {
    let mut page = PageModel::new(&ModelId::ALL);
    let renderer = Renderer::new(ResponseShape::ScalarWithBreakdown);
    let body = json!({
        "pathloss": 142.3,
        "fspl": 105.5111,
        "additional_loss": 36.788,
        "model": "ECC-33",
        "parameters": {
            "environment": "Rural",
            "frequency": 900,
            "distance": 5,
            "tx_height": 30,
            "rx_height": 1.5
        }
    });

    renderer
        .render(&decode(ResponseShape::ScalarWithBreakdown, body), &mut page)
        .expect("render");

    assert_eq!(page.text(ElementId::PathlossValue), Some("142.30 dB"));
    assert_eq!(page.text(ElementId::FsplValue), Some("105.51 dB"));
    assert_eq!(page.text(ElementId::AdditionalLossValue), Some("36.79 dB"));
    assert_eq!(page.text(ElementId::UsedModel), Some("ECC-33"));
    assert_eq!(page.text(ElementId::UsedEnvironment), Some("Rural"));
    assert_eq!(
        page.list(ElementId::ParametersList),
        &[
            "Frequency: 900 MHz".to_string(),
            "Distance: 5 km".to_string(),
            "TX Height: 30 m".to_string(),
            "RX Height: 1.5 m".to_string(),
        ]
    );
}

#[test]
fn whole_floats_from_the_service_print_without_fraction() {
    let mut page = PageModel::new(&ModelId::ALL);
    let renderer = Renderer::new(ResponseShape::Scalar);
    let body = json!({
        "pathloss": 142.0,
        "model": "Okumura-Hata",
        "parameters": {
            "environment": "Urban",
            "frequency": 900.0,
            "distance": 5.0,
            "tx_height": 30.0,
            "rx_height": 1.5
        }
    });

    renderer
        .render(&decode(ResponseShape::Scalar, body), &mut page)
        .expect("render");

    assert_eq!(page.text(ElementId::PathlossValue), Some("142"));
    assert_eq!(
        page.list(ElementId::ParametersList),
        &[
            "Frequency: 900 MHz".to_string(),
            "Distance: 5 km".to_string(),
            "TX Height: 30 m".to_string(),
            "RX Height: 1.5 m".to_string(),
        ]
    );
}

#[test]
fn exact_ties_round_away_from_zero() {
    let cases = [
        (120.125, "120.13 dB"),
        (0.125, "0.13 dB"),
        (-0.125, "-0.13 dB"),
        (36.788, "36.79 dB"),
        (0.285, "0.28 dB"),
        (100.0, "100.00 dB"),
    ];
    for (value, expected) in cases {
        assert_eq!(format_loss(&Figure::from(value)), expected, "{value}");
    }
}

#[test]
fn batch_summary_and_rows_keep_server_order() {
    let mut page = PageModel::new(&ModelId::ALL);
    let renderer = Renderer::new(ResponseShape::Batch);

    renderer
        .render(&decode(ResponseShape::Batch, batch_body()), &mut page)
        .expect("render");

    assert_eq!(page.text(ElementId::TotalCalculations), Some("3"));
    assert_eq!(page.text(ElementId::MinPathloss), Some("120.1 dB"));
    assert_eq!(page.text(ElementId::MaxPathloss), Some("130.4 dB"));
    assert_eq!(page.text(ElementId::AvgPathloss), Some("125.2 dB"));
    assert_eq!(page.text(ElementId::PathlossRange), Some("10.3 dB"));

    let rows = page.table_rows();
    assert_eq!(rows.len(), 3);
    let pathlosses: Vec<&str> = rows.iter().map(|row| row[4].as_str()).collect();
    assert_eq!(pathlosses, ["130.4", "120.1", "125.2"]);
    assert_eq!(rows[1][1], "0.5");
}

#[test]
fn rendering_twice_matches_rendering_once() {
    let result = decode(ResponseShape::Batch, batch_body());
    let renderer = Renderer::new(ResponseShape::Batch);

    let mut once = PageModel::new(&ModelId::ALL);
    renderer.render(&result, &mut once).expect("render");

    let mut twice = PageModel::new(&ModelId::ALL);
    renderer.render(&result, &mut twice).expect("render");
    renderer.render(&result, &mut twice).expect("render");

    assert_eq!(once.table_rows(), twice.table_rows());
    for element in [
        ElementId::UsedModel,
        ElementId::TotalCalculations,
        ElementId::MinPathloss,
        ElementId::PathlossRange,
    ] {
        assert_eq!(once.text(element), twice.text(element));
    }
    assert_eq!(once.is_visible(Region::Results), twice.is_visible(Region::Results));
}

#[test]
fn text_summary_figures_are_left_without_unit() {
    assert_eq!(with_loss_unit(&Figure::Text("n/a".into())), "n/a");
    assert_eq!(with_loss_unit(&Figure::from(10.3)), "10.3 dB");
}

#[test]
fn renderer_refuses_a_result_of_another_shape() {
    let mut page = PageModel::new(&ModelId::ALL);
    let renderer = Renderer::new(ResponseShape::Batch);

    let err = renderer
        .render(&decode(ResponseShape::Scalar, scalar_body()), &mut page)
        .expect_err("shape mismatch");

    assert!(matches!(err, RenderError::ShapeMismatch { .. }));
    assert!(!page.is_visible(Region::Results));
}

#[test]
fn scalar_body_does_not_decode_as_batch() {
    assert!(ResponseShape::Batch.decode(scalar_body()).is_err());
}

#[test]
fn shape_names_parse_back() {
    for shape in [
        ResponseShape::Scalar,
        ResponseShape::ScalarWithBreakdown,
        ResponseShape::Batch,
    ] {
        assert_eq!(shape.name().parse::<ResponseShape>(), Ok(shape));
    }
}
