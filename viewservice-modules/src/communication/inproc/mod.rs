pub mod inproc_view_service_communicator;
