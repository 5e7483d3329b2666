use serde::{Deserialize, Serialize};
use subpub::event::Event;
use subpub_macros::event;

#[event]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
enum OrderEvent {
    Placed { order_id: u64 },
    Cancelled { order_id: u64, reason: String },
}

mod billing {
    #[subpub_macros::event]
    pub struct Created {
        pub id: u64,
    }
}

mod shipping {
    #[subpub_macros::event]
    pub struct Created {
        pub id: u64,
    }
}

fn main() {
    // 默认名称为 `模块路径::类型名`
    assert!(OrderEvent::NAME.ends_with("::OrderEvent"));

    let ev = OrderEvent::Cancelled {
        order_id: 7,
        reason: "duplicate".to_string(),
    };
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["kind"], "Cancelled");
    assert_eq!(serde_json::from_value::<OrderEvent>(json).unwrap(), ev);
    let _ = OrderEvent::Placed { order_id: 1 };

    assert!(billing::Created::NAME.ends_with("billing::Created"));
    assert!(shipping::Created::NAME.ends_with("shipping::Created"));
    assert_ne!(billing::Created::NAME, shipping::Created::NAME);
    let _ = (billing::Created { id: 1 }, shipping::Created { id: 2 });
}
