use viewservice::{View, ViewServiceRequestHandler};

use crate::steps;
use crate::steps::servers::ServerPool;
use crate::steps::view::{has_roles, ping_for_ticks, wait_for_view};

const CLIENT_QUERIES: u64 = 10;

pub fn run() {
	let (worker, communicator) = steps::start_view_service();
	let mut pool = ServerPool::new(communicator, &["s1"]);

	// queries neither register the caller nor change the view
	for _ in 0..CLIENT_QUERIES {
		assert_eq!(View::initial(), pool.query());
	}
	assert_eq!(None, pool.handler().primary().expect("can query primary"));

	let statistics = worker.statistics().clone();
	assert_eq!(CLIENT_QUERIES + 1, statistics.queries_served());
	assert_eq!(0, statistics.heartbeats_received());

	wait_for_view(&mut pool, "first primary", |view| view.primary.is_some());

	let primary = pool.handler().primary().expect("can query primary");
	assert_eq!(Some("s1"), primary.as_ref().map(|id| id.as_str()));

	let view = ping_for_ticks(&mut pool, 10);
	assert!(has_roles(&view, Some("s1"), None));

	assert!(statistics.heartbeats_received() > 0);
	assert_eq!(statistics.heartbeats_received() + statistics.queries_served(),
			   statistics.requests_served());
	assert!(statistics.ticks() > 0);
	assert_eq!(1, statistics.views_committed());

	worker.terminate().expect("view service terminated");
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_clients() {
		crate::cases::clients::run()
	}
}
