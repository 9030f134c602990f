//! BEI events, written to clients as single-line JSON objects tagged by
//! an `event` field.

use std::collections::BTreeMap;

use serde::Serialize;

/// Server-to-client events.
#[derive(Debug, Serialize)]
#[serde(tag = "event")]
pub enum Event {
    /// Handshake acknowledgement with engine identification.
    #[serde(rename = "okbei")]
    OkBei {
        /// Protocol version.
        version: u32,
        /// Identification map; carries at least `name`.
        id: BTreeMap<String, String>,
    },
    /// The ranked best play as `(from, to)` pairs; empty when the state
    /// has no legal play.
    #[serde(rename = "okmove")]
    OkMove {
        /// The recommended play.
        moves: Vec<(u8, u8)>,
    },
    /// The chosen Acey-Deucey doubles value.
    #[serde(rename = "okchoose")]
    OkChoose {
        /// A die value 1..6.
        roll: i8,
    },
}

impl Event {
    /// The handshake reply identifying this engine.
    pub fn ok_bei() -> Event {
        let mut id = BTreeMap::new();
        id.insert("name".to_string(), "fevga".to_string());
        Event::OkBei { version: 1, id }
    }

    /// Encode the event as one JSON line (without the newline).
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Event;

    #[test]
    fn ok_bei_encodes_identification() {
        let line = Event::ok_bei().encode().unwrap();
        assert_eq!(
            line,
            r#"{"event":"okbei","version":1,"id":{"name":"fevga"}}"#
        );
    }

    #[test]
    fn ok_move_encodes_pairs() {
        let line = Event::OkMove {
            moves: vec![(8, 5), (6, 5)],
        }
        .encode()
        .unwrap();
        assert_eq!(line, r#"{"event":"okmove","moves":[[8,5],[6,5]]}"#);
    }

    #[test]
    fn ok_move_encodes_the_empty_play() {
        let line = Event::OkMove { moves: vec![] }.encode().unwrap();
        assert_eq!(line, r#"{"event":"okmove","moves":[]}"#);
    }

    #[test]
    fn ok_choose_encodes_the_roll() {
        let line = Event::OkChoose { roll: 4 }.encode().unwrap();
        assert_eq!(line, r#"{"event":"okchoose","roll":4}"#);
    }

    #[test]
    fn events_stay_on_one_line() {
        for event in [Event::ok_bei(), Event::OkMove { moves: vec![(24, 18)] }] {
            assert!(!event.encode().unwrap().contains('\n'));
        }
    }
}
