use serde_json::json;

use super::{RecordingEndpoint, treatment_session};
use crate::form::{Dispatched, FormCommand, FormEngine, SubmissionState, apply_command};

#[test]
fn commands_deserialize_from_tagged_objects() {
    let commands: Vec<FormCommand> = serde_json::from_value(json!([
        {"op": "set", "path": "treatments[0].numberOfDoses", "value": 2},
        {"op": "add_entry"},
        {"op": "remove_entry", "index": 1},
        {"op": "set", "path": "treatedOn"},
        {"op": "submit"},
        {"op": "reset"}
    ]))
    .unwrap();
    assert_eq!(commands.len(), 6);
    assert_eq!(commands[2], FormCommand::RemoveEntry { index: 1 });
    assert_eq!(
        commands[3],
        FormCommand::Set {
            path: "treatedOn".into(),
            value: json!(null)
        }
    );
}

#[test]
fn apply_command_leaves_submit_to_the_engine() {
    let mut session = treatment_session();
    assert!(apply_command(&mut session, FormCommand::AddEntry).unwrap());
    assert!(!apply_command(&mut session, FormCommand::Submit).unwrap());
    assert_eq!(session.state(), SubmissionState::Editable);
    assert_eq!(session.entries().len(), 2);
}

#[tokio::test]
async fn engine_replays_a_full_session() {
    let endpoint = RecordingEndpoint::accepting();
    let mut session = treatment_session();
    let mut engine = FormEngine::new(&mut session, &endpoint);

    let script = [
        FormCommand::Set {
            path: "treatments[0].numberOfDoses".into(),
            value: json!(3),
        },
        FormCommand::Set {
            path: "/treatments/0/doses/0/taken".into(),
            value: json!("true"),
        },
        FormCommand::Set {
            path: "treatments[0].numberOfDoses".into(),
            value: json!(1),
        },
        FormCommand::Set {
            path: "treatments[0].numberOfDoses".into(),
            value: json!(3),
        },
    ];
    for command in script {
        assert_eq!(engine.dispatch(command).await.unwrap(), Dispatched::Applied(true));
    }

    let outcome = engine.dispatch(FormCommand::Submit).await.unwrap();
    assert!(matches!(outcome, Dispatched::Submitted(ref result) if result.is_accepted()));
    assert_eq!(
        engine.dispatch(FormCommand::AddEntry).await.unwrap(),
        Dispatched::Applied(false)
    );
    assert_eq!(
        engine.dispatch(FormCommand::Reset).await.unwrap(),
        Dispatched::Applied(true)
    );
    assert_eq!(engine.session().entries().len(), 1);

    let sent = endpoint.last_document().unwrap();
    assert_eq!(
        sent["treatments"][0]["doses"],
        json!([
            {"date": null, "taken": true},
            {"date": null, "taken": false},
            {"date": null, "taken": false}
        ])
    );
}

#[tokio::test]
async fn engine_surfaces_path_errors() {
    let endpoint = RecordingEndpoint::accepting();
    let mut session = treatment_session();
    let mut engine = FormEngine::new(&mut session, &endpoint);
    let err = engine
        .dispatch(FormCommand::Set {
            path: "treatments[0].colour".into(),
            value: json!("red"),
        })
        .await
        .unwrap_err();
    assert!(err.message.contains("colour"));
}
