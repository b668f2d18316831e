#[cfg(test)]
pub const FIRST_PAGE_JSON: &str = r#"{
  "page": 1,
  "results_per_page": 2,
  "results_size": 2,
  "total_results_size": 3,
  "total_pages": 2,
  "next_page": "https://blog.cdn.prismic.io/api/v2/documents/search?ref=YF0&page=2&pageSize=2",
  "prev_page": null,
  "results": [
    {
      "id": "YE-8QBIAACMAbKdA",
      "uid": "como-utilizar-hooks",
      "type": "posts",
      "first_publication_date": "2021-03-15T19:25:28+0000",
      "last_publication_date": "2021-03-25T19:25:28+0000",
      "data": {
        "title": "Como utilizar Hooks",
        "subtitle": "Pensando em sincronização em vez de ciclos de vida.",
        "author": "Joseph Oliveira"
      }
    },
    {
      "id": "YE-8QBIAACMAbKdB",
      "uid": "criando-um-app-cra-do-zero",
      "type": "posts",
      "first_publication_date": "2021-03-25T00:00:00Z",
      "last_publication_date": "2021-03-20T10:00:00+0000",
      "data": {
        "title": "Criando um app CRA do zero",
        "subtitle": "Tudo sobre como criar a sua primeira aplicação utilizando Create React App",
        "author": "Danilo Vieira"
      }
    }
  ]
}"#;

#[cfg(test)]
pub const LAST_PAGE_JSON: &str = r#"{
  "page": 2,
  "results_per_page": 2,
  "results_size": 1,
  "total_results_size": 3,
  "total_pages": 2,
  "next_page": null,
  "prev_page": "https://blog.cdn.prismic.io/api/v2/documents/search?ref=YF0&page=1&pageSize=2",
  "results": [
    {
      "id": "YE-8QBIAACMAbKdC",
      "type": "posts",
      "first_publication_date": null,
      "last_publication_date": null,
      "data": {
        "title": "Rascunho",
        "subtitle": "Ainda não publicado",
        "author": "Joseph Oliveira"
      }
    }
  ]
}"#;

#[cfg(test)]
pub const API_ROOT_JSON: &str = r#"{
  "refs": [
    { "id": "preview", "ref": "YGpreview", "label": "Preview", "isMasterRef": false },
    { "id": "master", "ref": "YF0", "label": "Master", "isMasterRef": true }
  ],
  "types": { "posts": "Posts" },
  "languages": [{ "id": "pt-br", "name": "Portuguese - Brazil" }]
}"#;
