use dotenvy::dotenv;
use pandora_web::{client::PandoraClient, Event};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let username = std::env::var("PANDORA_USERNAME").expect("Pandora username not in environment");
    let password = std::env::var("PANDORA_PASSWORD").expect("Pandora password not in environment");

    let mut client = PandoraClient::new().expect("failed to build Pandora client");
    let mut events = client.subscribe();

    // print every event the client publishes while logging in
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::Ready => println!("[{}] logged in", event.topic()),
                Event::Debug(ref message) => println!("[{}] {}", event.topic(), message),
                _ => {}
            }
        }
    });

    let user = client
        .login(&username, &password)
        .await
        .expect("failed to log in");

    println!(
        "Logged in as {} (listener {})",
        user.username().unwrap_or("?"),
        user.id().unwrap_or("?")
    );
    println!("Explicit content allowed: {}", user.explicit());
    println!("Subscription flags: {:?}", user.config().flags);
}
