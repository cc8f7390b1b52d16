use http::HeaderValue;
use reqsign_intercept_core::{
    CanonicalRequest, Config, Env, OsEnv, Payload, ProvideCredential, RequestInterceptor, Result,
    SignRequest, SignedResult, SigningAdapter, SigningContext, SigningCredential, TargetHost,
};

// Define a custom credential type
#[derive(Clone, Debug)]
struct MyCredential {
    api_key: String,
    api_secret: String,
}

impl SigningCredential for MyCredential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

// Implement a credential provider that loads from environment
#[derive(Debug)]
struct MyCredentialProvider<E: Env> {
    env: E,
}

impl<E: Env> ProvideCredential for MyCredentialProvider<E> {
    type Credential = MyCredential;

    fn provide_credential(&self) -> Result<Option<Self::Credential>> {
        let api_key = self.env.var("MY_API_KEY").unwrap_or_default();
        let api_secret = self.env.var("MY_API_SECRET").unwrap_or_default();

        // For demo purposes, use dummy credentials if none are provided
        if api_key.is_empty() || api_secret.is_empty() {
            println!("No credentials found in environment, using demo credentials");
            return Ok(Some(MyCredential {
                api_key: "demo-api-key".to_string(),
                api_secret: "demo-api-secret".to_string(),
            }));
        }

        Ok(Some(MyCredential {
            api_key,
            api_secret,
        }))
    }
}

// Implement a signer
#[derive(Debug)]
struct MySigner;

impl SignRequest for MySigner {
    type Credential = MyCredential;

    fn sign_request(
        &self,
        req: CanonicalRequest,
        ctx: &SigningContext<'_, Self::Credential>,
    ) -> Result<SignedResult> {
        let cred = ctx.credential();
        let mut headers = req.headers().clone();

        headers.insert("x-api-key", HeaderValue::from_str(&cred.api_key)?);

        // In a real implementation, you would calculate a signature over
        // method, path, query, headers and payload here.
        headers.insert(
            "x-api-signature",
            HeaderValue::from_str(&format!(
                "{}:{}:{}:{}",
                ctx.service(),
                ctx.region(),
                req.method(),
                req.path()
            ))?,
        );

        Ok(SignedResult::new(headers))
    }
}

fn main() -> Result<()> {
    // Region comes from AWS_REGION or AWS_DEFAULT_REGION when set
    let mut config = Config::new("my-api").from_env(&OsEnv);
    if config.region.is_none() {
        config = config.with_region("local");
    }

    let adapter = SigningAdapter::new(config, MyCredentialProvider { env: OsEnv }, MySigner)?;

    // Create a request as a classic client would
    let mut req = http::Request::builder()
        .method("POST")
        .uri("/v1/users?limit=10")
        .header("content-type", "application/json")
        .body(Payload::from(r#"{"name":"demo"}"#))?;
    req.extensions_mut()
        .insert("https://api.example.com".parse::<TargetHost>()?);

    // Sign the request
    match adapter.process(&mut req) {
        Ok(_) => {
            println!("Request signed successfully!");
            println!("Headers: {:?}", req.headers());
        }
        Err(e) => {
            eprintln!("Failed to sign request: {}", e);
        }
    }

    Ok(())
}
