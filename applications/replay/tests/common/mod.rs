/// Common test utilities and fixtures
use tempo_core::Library;
use tempo_playback::PlaybackConfig;
use tempo_replay::{Catalog, Command, CommandOutput, Dispatcher};

pub const LIBRARY_JSON: &str = r#"{
    "songs": [
        {"name": "A", "duration": 100, "artist": "Band"},
        {"name": "B", "duration": 150, "artist": "Band"},
        {"name": "Solo", "duration": 200}
    ],
    "podcasts": [
        {"name": "Cast", "owner": "host", "episodes": [
            {"name": "E1", "duration": 60},
            {"name": "E2", "duration": 60},
            {"name": "E3", "duration": 60}
        ]}
    ],
    "playlists": [
        {"name": "Mix", "owner": "ann", "songs": ["A", "B"]},
        {"name": "Empty", "owner": "ann", "songs": []}
    ],
    "albums": [{"name": "Debut", "owner": "Band", "songs": ["A", "B"]}],
    "users": [
        {"username": "ann", "age": 25, "city": "Iasi"},
        {"username": "vip", "age": 40, "city": "Arad", "premium": true}
    ]
}"#;

pub fn library() -> Library {
    Library::from_json(LIBRARY_JSON).unwrap()
}

pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(Catalog::new(library(), &PlaybackConfig::default()))
}

/// Dispatch and return the output message
pub fn message(dispatcher: &mut Dispatcher, command: Command) -> String {
    output(dispatcher, command)
        .message
        .expect("command should produce a message")
}

/// Dispatch and return the output record
pub fn output(dispatcher: &mut Dispatcher, command: Command) -> CommandOutput {
    dispatcher
        .dispatch(&command)
        .unwrap()
        .expect("command should produce output")
}
