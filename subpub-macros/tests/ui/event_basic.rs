use subpub::event::Event;
use subpub_macros::event;

#[event(name = "user.registered")]
struct UserRegistered {
    name: String,
}

fn main() {
    assert_eq!(UserRegistered::NAME, "user.registered");

    // 合并后的派生：Clone + Serialize + Deserialize
    let ev = UserRegistered {
        name: "Bob".to_string(),
    };
    let json = serde_json::to_value(ev.clone()).unwrap();
    let back: UserRegistered = serde_json::from_value(json).unwrap();
    assert_eq!(back.name, ev.name);
}
