pub mod test_rematch_supersedes_session;
