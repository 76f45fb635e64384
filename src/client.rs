use super::*;

pub(crate) struct Client {
  client: reqwest::Client,
}

impl Client {
  const TIMEOUT: Duration = Duration::from_secs(30);

  const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

  pub(crate) fn new() -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(Self::USER_AGENT)
      .timeout(Self::TIMEOUT)
      .build()?;

    Ok(Self { client })
  }
}

impl Fetch for Client {
  async fn get(&self, url: &str) -> Result<Reply, Error> {
    let transport = |error: reqwest::Error| Error::Transport {
      reason: error.to_string(),
      status: error.status().map(|status| status.as_u16()),
      url: url.to_string(),
    };

    let response = self.client.get(url).send().await.map_err(transport)?;

    let status = response.status().as_u16();

    let body = response.bytes().await.map_err(transport)?.to_vec();

    debug!(%url, status, bytes = body.len(), "fetched");

    Ok(Reply { body, status })
  }
}
