use crate::steps;
use crate::steps::servers::ServerPool;
use crate::steps::view::{has_roles, wait_for_view};

pub fn run() {
	let (worker, communicator) = steps::start_view_service();
	let mut pool = ServerPool::new(communicator, &["s1", "s2"]);

	wait_for_view(&mut pool, "primary and backup",
				  |view| has_roles(view, Some("s1"), Some("s2")));

	pool.server_mut("s2").crash();

	let view = wait_for_view(&mut pool, "backup dropped", |view| view.backup.is_none());
	assert_eq!(3, view.view_number);
	assert!(has_roles(&view, Some("s1"), None));

	// the old backup comes back without state and is assigned again
	pool.server_mut("s2").restart();

	let view = wait_for_view(&mut pool, "backup reassigned", |view| view.backup.is_some());
	assert_eq!(4, view.view_number);
	assert!(has_roles(&view, Some("s1"), Some("s2")));

	worker.terminate().expect("view service terminated");
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_backup_failure() {
		crate::cases::backup_failure::run()
	}
}
