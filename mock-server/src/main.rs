use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let seed = vec![mock_server::User {
        id: 42,
        name: "Ada".to_string(),
    }];
    println!("mock REST API listening on {addr}");
    mock_server::serve(listener, mock_server::app_with_users(seed)).await
}
