#![allow(dead_code)]

use bondkeeper::db::schema::init_schema;
use bondkeeper::store::contacts::add_contact;
use bondkeeper::store::messages::add_messages;
use bondkeeper::store::types::NewMessage;
use rusqlite::Connection;

/// Open a fresh in-memory database with the schema applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

/// A three-row CSV log in the documented import format.
pub fn sample_csv() -> &'static str {
    "timestamp,direction,text\n\
     2024-03-01 09:15,inbound,Hey! Long time no see.\n\
     2024-03-01 09:20,outbound,\"I know, it's been ages. How are you?\"\n\
     2024-03-02 18:40,inbound,Swamped with the move but hanging in there.\n"
}

/// Insert a contact with a few messages and return its ID.
pub fn seed_contact(conn: &mut Connection, name: &str, notes: &str) -> i64 {
    let cid = add_contact(conn, name, notes).unwrap();
    let rows = vec![
        NewMessage {
            timestamp: "2024-03-01 09:15".into(),
            direction: "inbound".into(),
            text: "Hey! Long time no see.".into(),
        },
        NewMessage {
            timestamp: "2024-03-02 18:40".into(),
            direction: "outbound".into(),
            text: "Let's catch up soon.".into(),
        },
    ];
    add_messages(conn, cid, &rows).unwrap();
    cid
}
