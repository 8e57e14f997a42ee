//! Transit pass walkthrough against the live wallet objects API.
//!
//! Creates a class and an object, updates, patches and messages both,
//! expires the object, prints two save-to-wallet links, then batch-inserts
//! three more objects.
//!
//! Run with:
//! ```bash
//! GOOGLE_APPLICATION_CREDENTIALS=/path/to/key.json \
//! WALLET_ISSUER_ID=3388000000022125581 \
//! WALLET_ORIGINS=www.example.com \
//! RUST_LOG=info cargo run --example transit
//! ```

use tracing_subscriber::EnvFilter;
use wallet_pass_sdk::prelude::*;

const CLASS_SUFFIX: &str = "transit_demo_class";

#[tokio::main]
async fn main() -> Result<(), SdkError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WalletConfig::from_env()?;
    let issuer_id = config.require_issuer_id()?.to_string();
    let client = WalletClientBuilder::from_config(&config).build()?;

    let class_id = ResourceId::new(&issuer_id, CLASS_SUFFIX);
    let object_id = ResourceId::random(&issuer_id);

    // Classes
    let class = client
        .classes()
        .create(TransitClass::sample(class_id.clone()))
        .await?
        .into_resource();
    let homepage = Uri::new("https://developers.google.com/wallet", "Homepage description");
    client.classes().set_homepage_update(&class_id, homepage.clone()).await?;
    client.classes().set_homepage_patch(&class_id, homepage).await?;
    client
        .classes()
        .add_message(&class_id, Message::new("Class message header", "Class message body"))
        .await?;

    // Objects
    let object = client
        .objects()
        .create(TransitObject::sample(object_id.clone(), class_id.clone()))
        .await?
        .into_resource();
    let link = Uri::new("https://developers.google.com/wallet", "New link description");
    client.objects().add_link_update(&object_id, link.clone()).await?;
    client.objects().add_link_patch(&object_id, link).await?;
    client.objects().expire(&object_id).await?;
    client
        .objects()
        .add_message(&object_id, Message::new("Object message header", "Object message body"))
        .await?;

    // Save links
    println!("Add to wallet link (new objects):");
    println!("{}", client.links().new_objects(&class, &object)?);

    let references = PassKind::ALL
        .iter()
        .map(|kind| {
            let suffix = format!("{}_OBJECT_SUFFIX", kind.as_str().to_uppercase());
            let class_suffix = format!("{}_CLASS_SUFFIX", kind.as_str().to_uppercase());
            let reference = ObjectReference::with_class(
                ResourceId::new(&issuer_id, &suffix),
                ResourceId::new(&issuer_id, &class_suffix),
            );
            (*kind, reference)
        })
        .collect();
    println!("Add to wallet link (existing objects):");
    println!("{}", client.links().existing_objects(references)?);

    // Batch
    let batch: Vec<TransitObject> = (0..3)
        .map(|_| TransitObject::sample(ResourceId::random(&issuer_id), class_id.clone()))
        .collect();
    for item in client.objects().batch_insert(&batch).await? {
        match &item.outcome {
            Ok(_) => println!("created {}", item.id().unwrap_or("<no id>")),
            Err(error) => println!("failed ({}): {}", item.status, error),
        }
    }

    Ok(())
}
