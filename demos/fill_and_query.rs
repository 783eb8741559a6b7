//! Discovery registry walkthrough
//!
//! Run with: cargo run --example fill_and_query
//!
//! Fills a registry with a small studio setup (one node, one device, two
//! sources feeding two flows, senders and receivers for each) and then runs
//! the kinds of queries a Query API front end would issue:
//!
//! - list everything with paging metadata
//! - exact-match filters on relational fields (`node_id`, `device_id`, `format`)
//! - unanchored pattern filters on `label` / `description`
//! - error cases: malformed and absent identifiers, unimplemented subscriptions
//!
//! Set RUST_LOG=debug to watch the query engine evaluate each request.

use nmos_registry::{
    Device, Flow, Format, Node, QueryParams, Receiver, Registry, Sender, Source, Transport,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let registry = Registry::new();

    let node = registry
        .put_node(
            Node::new("Studio rack", "http://rack0.studio.local:3000", "rack0")
                .with_description("Machine room, rack 0"),
        )
        .await?;
    let device = registry
        .put_device(Device::new("Capture card", node.id))
        .await?;

    let cam = registry
        .put_source(
            Source::new("Camera 1", Format::Video, device.id).with_description("Stage left"),
        )
        .await?;
    let mic = registry
        .put_source(Source::new("Boom mic", Format::Audio, device.id))
        .await?;

    let cam_flow = registry
        .put_flow(Flow::new("Camera 1 programme", Format::Video, cam.id))
        .await?;
    let mic_flow = registry
        .put_flow(Flow::new("Boom mix", Format::Audio, mic.id))
        .await?;

    registry
        .put_sender(Sender::new(
            "Programme out",
            cam_flow.id,
            Transport::RtpMulticast,
            device.id,
            "http://rack0.studio.local/programme.sdp",
        ))
        .await?;
    registry
        .put_sender(Sender::new(
            "Audio out",
            mic_flow.id,
            Transport::RtpMulticast,
            device.id,
            "http://rack0.studio.local/audio.sdp",
        ))
        .await?;
    registry
        .put_receiver(Receiver::new(
            "Monitor wall",
            Format::Video,
            Transport::RtpMulticast,
            device.id,
        ))
        .await?;
    registry
        .put_receiver(Receiver::new(
            "Talkback",
            Format::Audio,
            Transport::RtpMulticast,
            device.id,
        ))
        .await?;

    // Plain listing with paging metadata.
    let sources = registry.get_sources(&QueryParams::new()).await;
    println!(
        "sources: total={} page {}/{} ({} records)",
        sources.total, sources.page_of, sources.pages, sources.size
    );
    for s in &sources.records {
        println!("  [{}] {} ({})", s.id, s.label, s.format);
    }

    // Exact match on a relational field.
    let on_device = registry
        .get_receivers(
            &QueryParams::new()
                .with("device_id", device.id.to_string())
                .with("format", "audio"),
        )
        .await;
    println!(
        "audio receivers on {}: {:?}",
        device.label,
        on_device
            .records
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>()
    );

    // Unanchored pattern on a free-text field.
    let cameras = registry
        .get_sources(&QueryParams::new().with("label", "Cam"))
        .await;
    println!("label=Cam matched {} source(s)", cameras.total);

    // Error surface a transport layer would map to status codes.
    let bad = registry.get_node("not-a-uuid").await.unwrap_err();
    println!("{} -> HTTP {}", bad, bad.status_code());

    let absent = registry
        .get_node("6ab0376a-273d-4e59-9d4f-0f01d3b6ba55")
        .await
        .unwrap_err();
    println!("{} -> HTTP {}", absent, absent.status_code());

    let subs = registry.subscriptions().unwrap_err();
    println!("{} -> HTTP {}", subs, subs.status_code());

    Ok(())
}
