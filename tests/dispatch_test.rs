mod helpers;

use helpers::default_engine;
use karma::bot::{dispatch, ConsoleMessenger};

fn run(lines: &[&str]) -> String {
    let engine = default_engine();
    let mut out = ConsoleMessenger::new("karmabot", Vec::<u8>::new());
    for line in lines {
        dispatch(&engine, ".", line, &mut out);
    }
    String::from_utf8(out.into_inner()).unwrap()
}

#[test]
fn conversation_round_trip() {
    let transcript = run(&[
        "bob: alice++ for the review",
        "carol: morning all",
        "carol: alice++",
        "bob: .karma alice",
        "alice: .karma",
    ]);

    assert_eq!(
        transcript,
        "karmabot: alice: 1, reason: for the review\n\
         karmabot: alice: 2, reason: \n\
         karmabot: alice: 2, reason: \n\
         karmabot: .karma <nick> - Reports karma status for <nick>.\n"
    );
}

#[test]
fn self_vote_through_console_is_ignored() {
    let transcript = run(&["alice: alice++", "alice: .karma alice"]);
    assert_eq!(transcript, "karmabot: alice: 0, reason: None\n");
}

#[test]
fn lines_without_sender_are_skipped() {
    assert_eq!(run(&["alice++", ""]), "");
}
