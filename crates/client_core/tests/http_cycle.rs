use std::sync::Arc;

use axum::{extract::State, routing::post, Form, Json, Router};
use client_core::{
    ClientSettings, ControllerOptions, ElementId, HttpTransport, PageModel, PredictionController,
    Region, ResponseShape, SubmitEvent, SubmitOutcome, GENERIC_FAILURE_MESSAGE,
};
use serde_json::{json, Value};
use shared::domain::{ModelId, NumericField};
use tokio::{net::TcpListener, sync::Mutex};

type Fields = Vec<(String, String)>;

#[derive(Clone, Default)]
struct Seen {
    forms: Arc<Mutex<Vec<Fields>>>,
}

async fn simulate(State(seen): State<Seen>, Form(fields): Form<Fields>) -> Json<Value> {
    seen.forms.lock().await.push(fields);
    Json(json!({
        "model": "Okumura-Hata",
        "environment": "Urban",
        "summary": {
            "total_calculations": 3,
            "min_pathloss": 120.1,
            "max_pathloss": 130.4,
            "avg_pathloss": 125.2,
            "pathloss_range": 10.3
        },
        "results": [
            { "frequency": 900, "distance": 2, "tx_height": 30, "rx_height": 1.5,
              "pathloss": 120.1, "fspl": 97.55, "additional_loss": 22.55 },
            { "frequency": 900, "distance": 4, "tx_height": 30, "rx_height": 1.5,
              "pathloss": 125.2, "fspl": 103.57, "additional_loss": 21.63 },
            { "frequency": 900, "distance": 8, "tx_height": 30, "rx_height": 1.5,
              "pathloss": 130.4, "fspl": 109.59, "additional_loss": 20.81 }
        ]
    }))
}

async fn spawn_server() -> (String, Seen) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let seen = Seen::default();
    let app = Router::new()
        .route("/simulate", post(simulate))
        .with_state(seen.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), seen)
}

#[tokio::test]
async fn batch_cycle_over_http_fills_table_and_summary() {
    let (server_url, seen) = spawn_server().await;
    let settings = ClientSettings {
        server_url,
        ..ClientSettings::default()
    };
    let shape = ResponseShape::Batch;
    let transport = HttpTransport::new(
        settings.endpoint(shape).expect("endpoint"),
        settings.encoding_for(shape),
    );
    let controller = PredictionController::new(
        transport,
        shape,
        PageModel::new(&ModelId::ALL),
        settings.controller_options(),
    );

    controller.input_numeric(NumericField::Frequency, "900").await;
    controller.input_numeric(NumericField::Distance, "2,4,8").await;
    controller.input_numeric(NumericField::TxHeight, "30").await;
    controller.input_numeric(NumericField::RxHeight, "1.5").await;
    controller.select_model(ModelId::OkumuraHata).await;
    controller.set_environment("Urban").await;

    let outcome = controller.submit(&mut SubmitEvent::new()).await;
    assert!(matches!(outcome, SubmitOutcome::Succeeded(_)), "{outcome:?}");

    controller
        .with_sink(|page| {
            assert_eq!(page.table_rows().len(), 3);
            assert_eq!(page.table_rows()[2][1], "8");
            assert_eq!(page.text(ElementId::MinPathloss), Some("120.1 dB"));
            assert_eq!(page.text(ElementId::MaxPathloss), Some("130.4 dB"));
            assert_eq!(page.text(ElementId::AvgPathloss), Some("125.2 dB"));
            assert_eq!(page.text(ElementId::PathlossRange), Some("10.3 dB"));
            assert!(page.is_visible(Region::Results));
            assert!(!page.is_visible(Region::Error));
        })
        .await;

    let forms = seen.forms.lock().await;
    assert_eq!(forms.len(), 1);
    assert!(forms[0].contains(&("distance".to_string(), "2,4,8".to_string())));
    assert!(forms[0].contains(&("model".to_string(), "Okumura-Hata".to_string())));
}

#[tokio::test]
async fn unreachable_service_surfaces_generic_message() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let settings = ClientSettings {
        server_url: format!("http://{addr}"),
        ..ClientSettings::default()
    };
    let shape = ResponseShape::Scalar;
    let controller = PredictionController::new(
        HttpTransport::new(
            settings.endpoint(shape).expect("endpoint"),
            settings.encoding_for(shape),
        ),
        shape,
        PageModel::new(&ModelId::ALL),
        ControllerOptions::default(),
    );

    let outcome = controller.submit(&mut SubmitEvent::new()).await;

    assert_eq!(outcome, SubmitOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string()));
    controller
        .with_sink(|page| {
            assert_eq!(page.text(ElementId::ErrorMessage), Some(GENERIC_FAILURE_MESSAGE));
            assert!(page.is_visible(Region::Error));
            assert!(!page.is_visible(Region::Results));
            assert!(page.trigger().enabled);
        })
        .await;
}
