use axum::Router;

/// Binds a local server and builds its router with the server's own base url,
/// so fixtures can link back to it.
pub async fn spawn_test_server(
    build: impl FnOnce(&str) -> Router,
) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    let base = format!("http://{address}");
    let app = build(&base);
    let join_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });
    (base, join_handle)
}
