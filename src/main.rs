use axum::{Router, routing::get};
use groupstay::api::handlers::api_routes;
use groupstay::api::openapi::ApiDoc;
use groupstay::config::CONFIG;
use groupstay::core::models::{Hotel, Room};
use groupstay::core::services::GroupStayService;
use groupstay::infrastructure::booking::in_memory::InMemoryBookingEngine;
use groupstay::infrastructure::notify::channel::ChannelNotifier;
use groupstay::infrastructure::storage::in_memory::InMemoryStorage;
use groupstay::infrastructure::storage::Storage;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

/// Seed a demo hotel with a few rooms so the engine is usable out of the box.
/// The real catalog lives in a separate subsystem.
async fn seed_demo_catalog(
    storage: &InMemoryStorage,
    booking: &InMemoryBookingEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let hotel = Hotel {
        id: Uuid::new_v4(),
        name: "Grand Meridian".to_string(),
        city: "Lisbon".to_string(),
    };
    storage.save_hotel(hotel.clone()).await?;
    info!("Seeded demo hotel {} ({})", hotel.name, hotel.id);

    for (number, capacity, nightly_rate) in [
        ("101", 2, 120.0),
        ("102", 2, 120.0),
        ("201", 3, 160.0),
        ("202", 4, 210.0),
    ] {
        let room = Room {
            id: Uuid::new_v4(),
            hotel_id: hotel.id,
            number: number.to_string(),
            capacity,
            nightly_rate,
        };
        booking.set_room_rate(room.id, room.nightly_rate).await;
        storage.save_room(room.clone()).await?;
        info!("Seeded room {} ({})", room.number, room.id);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.clone())
        .init();

    // Initialize storage, booking engine and the event fan-out channel
    let storage = InMemoryStorage::new();
    let booking = InMemoryBookingEngine::new();
    let (notifier, events_rx) = ChannelNotifier::new();
    ChannelNotifier::spawn_logging_publisher(events_rx);

    seed_demo_catalog(&storage, &booking).await?;

    let service = Arc::new(GroupStayService::new(storage, booking, notifier));

    let app = Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST])
                .allow_headers([http::header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
