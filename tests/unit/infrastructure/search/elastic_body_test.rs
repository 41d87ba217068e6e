// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use newsrank::domain::models::engagement::TrendingScoreUpdate;
    use newsrank::domain::models::news::{GeoPoint, NewsDocument};
    use newsrank::infrastructure::search::elastic::{bulk_body, index_mapping, update_body};
    use serde_json::Value;

    #[test]
    fn test_update_body_targets_single_document() {
        let update = TrendingScoreUpdate {
            document_id: 314,
            score: 8.5,
            last_event_time: Utc.with_ymd_and_hms(2025, 4, 2, 9, 30, 0).unwrap(),
        };
        let body = update_body(&update);

        assert_eq!(body["query"]["term"]["id"]["value"], 314);
        assert_eq!(body["script"]["lang"], "painless");
        assert_eq!(body["script"]["params"]["recent_activity_score"], 8.5);
        assert_eq!(
            body["script"]["params"]["last_event_time"],
            "2025-04-02T09:30:00+00:00"
        );
        let source = body["script"]["source"].as_str().unwrap();
        assert!(source.contains("ctx._source.recent_activity_score"));
        assert!(source.contains("ctx._source.last_event_time"));
    }

    #[test]
    fn test_mapping_declares_ranking_fields() {
        let mapping = index_mapping();
        let properties = &mapping["mappings"]["properties"];

        assert_eq!(properties["location"]["type"], "geo_point");
        assert_eq!(properties["last_event_time"]["type"], "date");
        assert_eq!(properties["category"]["type"], "keyword");
        assert_eq!(properties["source_name"]["fields"]["keyword"]["type"], "keyword");
        assert_eq!(properties["recent_activity_score"]["type"], "float");
    }

    #[test]
    fn test_bulk_body_pairs_action_with_source() {
        let document = NewsDocument {
            id: 7,
            title: "Harbour reopens".to_string(),
            description: "Ships return".to_string(),
            url: "https://news.example/harbour".to_string(),
            publication_date: None,
            source_name: "Port Gazette".to_string(),
            category: vec!["business".to_string()],
            relevance_score: 0.3,
            location: Some(GeoPoint::new(18.94, 72.84)),
            recent_activity_score: None,
            last_event_time: None,
        };

        let body = bulk_body(&[document]).unwrap();
        let lines: Vec<Value> = body
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert!(body.ends_with('\n'));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["index"]["_id"], "7");
        assert_eq!(lines[1]["id"], 7);
        assert_eq!(lines[1]["location"]["lon"], 72.84);
        assert!(bulk_body(&[]).unwrap().is_empty());
    }
}
