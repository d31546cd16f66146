use serde::Serialize;

use crate::client::{TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::Tag;

const TAG_PATH: &str = "/api/v1/link/tag";

#[derive(Serialize)]
struct TagBody<'a> {
    tag: &'a str,
}

impl<T: Transport> TlyClient<T> {
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        self.send(HttpMethod::Get, TAG_PATH, None, NO_BODY, "tag list")
    }

    pub fn create_tag(&self, tag: &str) -> Result<Tag> {
        self.send(HttpMethod::Post, TAG_PATH, None, Some(&TagBody { tag }), "tag")
    }

    pub fn get_tag(&self, id: i64) -> Result<Tag> {
        let path = format!("{TAG_PATH}/{id}");
        self.send(HttpMethod::Get, &path, None, NO_BODY, "tag")
    }

    /// Rename a tag.
    pub fn update_tag(&self, id: i64, tag: &str) -> Result<Tag> {
        let path = format!("{TAG_PATH}/{id}");
        self.send(HttpMethod::Put, &path, None, Some(&TagBody { tag }), "tag")
    }

    pub fn delete_tag(&self, id: i64) -> Result<()> {
        let path = format!("{TAG_PATH}/{id}");
        self.send_raw(HttpMethod::Delete, &path, None, NO_BODY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{client, json_body, respond};

    #[test]
    fn create_tag_posts_tag_text() {
        let c = client();
        c.transport().push(respond(201, r#"{"id":11,"tag":"launch","created_at":"2024-05-01"}"#));
        let tag = c.create_tag("launch").unwrap();
        assert_eq!(tag.id, 11);

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/v1/link/tag");
        assert_eq!(json_body(&req), json!({"tag": "launch"}));
    }

    #[test]
    fn update_tag_puts_to_id_path() {
        let c = client();
        c.transport().push(respond(200, r#"{"id":11,"tag":"relaunch"}"#));
        assert_eq!(c.update_tag(11, "relaunch").unwrap().tag, "relaunch");

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/v1/link/tag/11");
        assert_eq!(json_body(&req), json!({"tag": "relaunch"}));
    }

    #[test]
    fn list_get_delete_round() {
        let c = client();
        c.transport().push(respond(200, r#"[{"id":1,"tag":"a"},{"id":2,"tag":"b"}]"#));
        c.transport().push(respond(200, r#"{"id":2,"tag":"b"}"#));
        assert_eq!(c.list_tags().unwrap().len(), 2);
        assert_eq!(c.get_tag(2).unwrap().tag, "b");
        c.delete_tag(2).unwrap();

        let urls: Vec<_> = c
            .transport()
            .requests()
            .into_iter()
            .map(|r| (r.method, r.url))
            .collect();
        assert_eq!(
            urls,
            vec![
                (HttpMethod::Get, "http://localhost:3000/api/v1/link/tag".to_string()),
                (HttpMethod::Get, "http://localhost:3000/api/v1/link/tag/2".to_string()),
                (HttpMethod::Delete, "http://localhost:3000/api/v1/link/tag/2".to_string()),
            ]
        );
    }
}
