use crate::steps;
use crate::steps::servers::ServerPool;
use crate::steps::view::{has_roles, ping_for_ticks, wait_for_view};

pub fn run() {
	let (worker, communicator) = steps::start_view_service();
	let mut pool = ServerPool::new(communicator, &["s1", "s2"]);

	wait_for_view(&mut pool, "primary and backup",
				  |view| has_roles(view, Some("s1"), Some("s2")));

	// the backup is promoted only once the primary has reported view 2
	ping_for_ticks(&mut pool, 2);

	// s1 loses its state but keeps heartbeating: it must not stay primary
	pool.server_mut("s1").restart();

	let view = wait_for_view(&mut pool, "backup promoted",
							 |view| view.primary.as_ref().map(|id| id.as_str()) == Some("s2"));
	assert_eq!(3, view.view_number);

	let view = wait_for_view(&mut pool, "restarted server is backup", |view| view.backup.is_some());
	assert_eq!(4, view.view_number);
	assert!(has_roles(&view, Some("s2"), Some("s1")));

	worker.terminate().expect("view service terminated");
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_restart() {
		crate::cases::restart::run()
	}
}
