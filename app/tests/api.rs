use actix_web::{test, web, App};
use cnpj_consulta::api::{self, AppState};
use cnpj_consulta::{ClientConfig, CnpjClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_for(server: &MockServer) -> web::Data<AppState> {
    let client = CnpjClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap();
    web::Data::new(AppState { client })
}

#[actix_web::test]
async fn health_check_responds_ok() {
    let server = MockServer::start().await;
    let app = test::init_service(App::new().app_data(state_for(&server)).configure(api::configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn proxies_simplified_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cnpj/11222333000181"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cnpj": "11222333000181",
            "razao_social": "EMPRESA TESTE LTDA",
            "logradouro": "RUA A",
            "uf": "SP",
            "telefone1": "1133334444"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test::init_service(App::new().app_data(state_for(&server)).configure(api::configure)).await;
    let req = test::TestRequest::get()
        .uri("/cnpj/11222333000181?simplificar=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["endereco"]["logradouro"], "RUA A");
    assert_eq!(body["telefone"], "1133334444");
    assert!(body.get("telefone1").is_none());
}

#[actix_web::test]
async fn invalid_cnpj_is_bad_request() {
    let server = MockServer::start().await;
    let app = test::init_service(App::new().app_data(state_for(&server)).configure(api::configure)).await;

    let req = test::TestRequest::get().uri("/cnpj/12345678901234").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tipo"], "invalid_input");
    assert_eq!(body["cnpj"], "12345678901234");
    assert!(body["dica"].as_str().unwrap().contains("14 dígitos"));
}

#[actix_web::test]
async fn upstream_statuses_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cnpj/11222333000181"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cnpj/00000000000191"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cnpj/00623904000173"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test::init_service(App::new().app_data(state_for(&server)).configure(api::configure)).await;

    for (cnpj, status, tipo) in [
        ("11222333000181", 404, "not_found"),
        ("00000000000191", 429, "rate_limited"),
        ("00623904000173", 502, "request_failed"),
    ] {
        let req = test::TestRequest::get().uri(&format!("/cnpj/{}", cnpj)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "cnpj {}", cnpj);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["tipo"], tipo);
        assert_eq!(body["cnpj"], cnpj);
    }
}
