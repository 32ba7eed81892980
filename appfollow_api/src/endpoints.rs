//! One method per API operation.
//!
//! Required arguments are positional. Everything else goes through
//! [`Options`] and is forwarded as-is; a required argument replaces an option
//! with the same key.

use serde_json::Value;

use crate::{
    params::{Options, ParamValue, Params},
    signer::list_to_csv,
    Client, Error,
};

fn ext_params(ext_id: &str, options: &Options) -> Params {
    let mut params = Params::from(options);
    params.insert("ext_id", ext_id);
    params
}

impl Client {
    /// Lists the account's app collections.
    pub async fn collections(&self) -> Result<Value, Error> {
        self.call("/apps", Params::new()).await
    }

    /// Lists the apps in a collection.
    pub async fn collection_apps(&self, collection_id: impl Into<ParamValue>) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("apps_id", collection_id);
        self.call("/apps/app", params).await
    }

    /// Fetches reviews for an app.
    ///
    /// Common options: `from`, `to`, `date`, `page`, `country`, `lang`,
    /// `rating`, `answer_status`.
    pub async fn reviews(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/reviews", ext_params(ext_id, options)).await
    }

    pub async fn reviews_summary(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/reviews/summary", ext_params(ext_id, options)).await
    }

    /// Posts a reply to a review.
    pub async fn review_reply(
        &self,
        ext_id: &str,
        review_id: impl Into<ParamValue>,
        answer_text: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        let mut params = ext_params(ext_id, options);
        params.insert("review_id", review_id);
        params.insert("answer_text", answer_text);
        self.call("/reply", params).await
    }

    /// Replaces the tags on a review. Tags must not contain commas.
    pub async fn review_update_tags<S: AsRef<str>>(
        &self,
        ext_id: &str,
        review_id: impl Into<ParamValue>,
        tags: &[S],
        options: &Options,
    ) -> Result<Value, Error> {
        let mut params = ext_params(ext_id, options);
        params.insert("review_id", review_id);
        params.insert("tags", list_to_csv(tags));
        self.call("/tags/update", params).await
    }

    /// Replaces the bug tracker tags on a review.
    pub async fn review_update_bug_trackers<S: AsRef<str>>(
        &self,
        ext_id: &str,
        review_id: impl Into<ParamValue>,
        tags: &[S],
        options: &Options,
    ) -> Result<Value, Error> {
        let mut params = ext_params(ext_id, options);
        params.insert("review_id", review_id);
        params.insert("tags", list_to_csv(tags));
        self.call("/bt_tags/update", params).await
    }

    pub async fn review_update_notes(
        &self,
        ext_id: &str,
        review_id: impl Into<ParamValue>,
        content: &str,
    ) -> Result<Value, Error> {
        let mut params = ext_params(ext_id, &Options::new());
        params.insert("review_id", review_id);
        params.insert("content", content);
        self.call("/notes/update", params).await
    }

    pub async fn ratings(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/ratings", ext_params(ext_id, options)).await
    }

    pub async fn versions(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/versions", ext_params(ext_id, options)).await
    }

    pub async fn whats_new(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/whatsnew", ext_params(ext_id, options)).await
    }

    /// Category rankings. Common options: `country`, `device`, `date`.
    pub async fn rankings(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/rankings", ext_params(ext_id, options)).await
    }

    /// Tracked keyword positions. Common options: `country`, `device`, `date`.
    pub async fn keywords(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/keywords", ext_params(ext_id, options)).await
    }

    /// Replaces the tracked keyword list for a country/device pair.
    /// Keywords must not contain commas.
    pub async fn keywords_edit<S: AsRef<str>>(
        &self,
        country: &str,
        device: &str,
        keywords: &[S],
        options: &Options,
    ) -> Result<Value, Error> {
        let mut params = Params::from(options);
        params.insert("country", country);
        params.insert("device", device);
        params.insert("keywords", list_to_csv(keywords));
        self.call("/keywords/edit", params).await
    }

    pub async fn aso_suggest(&self, term: &str, options: &Options) -> Result<Value, Error> {
        let mut params = Params::from(options);
        params.insert("term", term);
        self.call("/aso/suggest", params).await
    }

    pub async fn aso_search(&self, term: &str, options: &Options) -> Result<Value, Error> {
        let mut params = Params::from(options);
        params.insert("term", term);
        self.call("/aso/search", params).await
    }

    pub async fn aso_search_ads(
        &self,
        app: &str,
        country: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        let mut params = Params::from(options);
        params.insert("app", app);
        params.insert("country", country);
        self.call("/aso/search_ads", params).await
    }

    pub async fn aso_trending(&self, keyword: &str, options: &Options) -> Result<Value, Error> {
        let mut params = Params::from(options);
        params.insert("keyword", keyword);
        self.call("/aso/trending", params).await
    }

    pub async fn app_analytics(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/app_analytics", ext_params(ext_id, options)).await
    }

    pub async fn aso_report(
        &self,
        ext_id: &str,
        channel: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        let mut params = ext_params(ext_id, options);
        params.insert("channel", channel);
        self.call("/reports/aso_report", params).await
    }

    /// Review counts over time.
    pub async fn reviews_stats(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/stat/reviews", ext_params(ext_id, options)).await
    }

    pub async fn reviews_stats_by_rating(
        &self,
        ext_id: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call("/stat/reviews/rating", ext_params(ext_id, options))
            .await
    }

    pub async fn reviews_stats_by_version(
        &self,
        ext_id: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call("/stat/reviews/version", ext_params(ext_id, options))
            .await
    }

    pub async fn reviews_stats_replies(
        &self,
        ext_id: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call("/stat/replies", ext_params(ext_id, options)).await
    }

    /// Average reply time.
    pub async fn reviews_stats_replies_speed(
        &self,
        ext_id: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call("/stat/replies/time", ext_params(ext_id, options))
            .await
    }

    /// Reviews across every app in the named collection.
    pub async fn collection_reviews(
        &self,
        collection_name: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call(
            format!("/{}/reviews", collection_name).as_str(),
            Params::from(options),
        )
        .await
    }

    pub async fn reviews_custom_status(
        &self,
        ext_id: &str,
        review_id: impl Into<ParamValue>,
        custom_status: &str,
    ) -> Result<Value, Error> {
        let mut params = ext_params(ext_id, &Options::new());
        params.insert("review_id", review_id);
        params.insert("custom_status", custom_status);
        self.call("/reviews/custom_status", params).await
    }

    /// Ratings export for an app within the named collection.
    pub async fn ratings_export(
        &self,
        collection_name: &str,
        ext_id: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call(
            format!("/{}/ratings_export", collection_name).as_str(),
            ext_params(ext_id, options),
        )
        .await
    }

    pub async fn reviews_featured(&self, ext_id: &str, options: &Options) -> Result<Value, Error> {
        self.call("/reviews/featured", ext_params(ext_id, options))
            .await
    }

    /// Reply counts per user.
    pub async fn reviews_reply_statistics(
        &self,
        ext_id: &str,
        options: &Options,
    ) -> Result<Value, Error> {
        self.call("/reviews/answer_count", ext_params(ext_id, options))
            .await
    }

    pub async fn countries(&self) -> Result<Value, Error> {
        self.call("/countries", Params::new()).await
    }
}
