use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use viewservice::{HeartbeatRequest, QueryRequest, ServerId, View, ViewServiceRequestHandler};

/// Candidate server of the replicated service: heartbeats with the last view it learned.
#[derive(Clone, Debug)]
pub struct CandidateServer {
	pub id: ServerId,
	view_number: u64,
	highest_view_number_seen: u64,
	running: bool,
}

impl CandidateServer {
	pub fn new(id: &str) -> CandidateServer {
		CandidateServer {
			id: ServerId::new(id),
			view_number: 0,
			highest_view_number_seen: 0,
			running: true,
		}
	}

	pub fn ping<H: ViewServiceRequestHandler>(&mut self, handler: &H) -> Option<View> {
		if !self.running {
			return None;
		}

		let request = HeartbeatRequest { server_id: self.id.clone(), view_number: self.view_number };
		match handler.heartbeat(request) {
			Ok(response) => {
				let view = response.view;
				assert!(view.view_number >= self.highest_view_number_seen,
						"Server {} observed view {} after view {}",
						self.id, view.view_number, self.highest_view_number_seen);

				self.highest_view_number_seen = view.view_number;
				self.view_number = view.view_number;
				Some(view)
			},
			Err(err) => {
				warn!("Server {} heartbeat failed: {}", self.id, err);
				None
			}
		}
	}

	/// Stops heartbeating.
	pub fn crash(&mut self) {
		info!("Server {} crashed", self.id);
		self.running = false;
	}

	/// Resumes heartbeating with all in-memory state lost.
	pub fn restart(&mut self) {
		info!("Server {} restarted", self.id);
		self.running = true;
		self.view_number = 0;
		self.highest_view_number_seen = 0;
	}
}

const PING_THREADS: usize = 16;

pub struct ServerPool<H: ViewServiceRequestHandler> {
	handler: H,
	// separate from the global pool the view service serves requests on
	thread_pool: ThreadPool,
	servers: Vec<CandidateServer>,
	last_queried_view_number: u64,
}

impl <H: ViewServiceRequestHandler> ServerPool<H> {
	pub fn new(handler: H, ids: &[&str]) -> ServerPool<H> {
		let thread_pool = ThreadPoolBuilder::new()
			.num_threads(PING_THREADS)
			.build()
			.expect("can build ping thread pool");

		ServerPool {
			handler,
			thread_pool,
			servers: ids.iter().map(|id| CandidateServer::new(id)).collect(),
			last_queried_view_number: 0,
		}
	}

	pub fn add_server(&mut self, id: &str) {
		self.servers.push(CandidateServer::new(id));
	}

	pub fn server_mut(&mut self, id: &str) -> &mut CandidateServer {
		self.servers.iter_mut()
			.find(|server| server.id.as_str() == id)
			.unwrap_or_else(|| panic!("server {} exists", id))
	}

	/// Heartbeats from every running server at once.
	pub fn ping_all(&mut self) {
		let handler = &self.handler;
		let servers = &mut self.servers;
		self.thread_pool.install(|| {
			servers.par_iter_mut()
				.for_each(|server| {
					server.ping(handler);
				});
		});
	}

	pub fn query(&mut self) -> View {
		let view = self.handler.query(QueryRequest).expect("can query view").view;
		assert!(view.view_number >= self.last_queried_view_number,
				"Query returned view {} after view {}", view.view_number, self.last_queried_view_number);
		self.last_queried_view_number = view.view_number;

		view
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}
}
