use portal_api::response::{ApiSearchResult, BusinessInformation, DocumentSearchResult, SearchResultDto};

use crate::consumer::{Api, ApiIdentifier, ApiProduct, Documentation};

/// Read access shared by APIs and API products so both go through one
/// mapping function.
pub trait ApiLike {
    fn uuid(&self) -> &str;
    fn identifier(&self) -> &ApiIdentifier;
    fn context(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn lifecycle_status(&self) -> &str;
    fn thumbnail_url(&self) -> Option<&str>;
    fn rating(&self) -> f32;
    fn transports(&self) -> Option<&str>;
    fn business_information(&self) -> BusinessInformation;
    fn is_product(&self) -> bool;
}

impl ApiLike for Api {
    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn identifier(&self) -> &ApiIdentifier {
        &self.id
    }
    fn context(&self) -> &str {
        &self.context
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn lifecycle_status(&self) -> &str {
        &self.status
    }
    fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }
    fn rating(&self) -> f32 {
        self.rating
    }
    fn transports(&self) -> Option<&str> {
        self.transports.as_deref()
    }
    fn business_information(&self) -> BusinessInformation {
        BusinessInformation {
            business_owner: self.business_owner.clone(),
            business_owner_email: self.business_owner_email.clone(),
        }
    }
    fn is_product(&self) -> bool {
        false
    }
}

impl ApiLike for ApiProduct {
    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn identifier(&self) -> &ApiIdentifier {
        &self.id
    }
    fn context(&self) -> &str {
        &self.context
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn lifecycle_status(&self) -> &str {
        &self.state
    }
    fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }
    fn rating(&self) -> f32 {
        self.rating
    }
    fn transports(&self) -> Option<&str> {
        self.transports.as_deref()
    }
    fn business_information(&self) -> BusinessInformation {
        BusinessInformation {
            business_owner: self.business_owner.clone(),
            business_owner_email: self.business_owner_email.clone(),
        }
    }
    fn is_product(&self) -> bool {
        true
    }
}

pub fn map_api_to_result<A: ApiLike + ?Sized>(api: &A) -> SearchResultDto {
    let id = api.identifier();
    let result = ApiSearchResult {
        id: api.uuid().to_string(),
        name: id.name.clone(),
        transport_type: api.transports().map(str::to_string),
        description: api.description().map(str::to_string),
        context: api.context().to_string(),
        version: id.version.clone(),
        provider: id.provider.clone(),
        status: api.lifecycle_status().to_string(),
        thumbnail_uri: api.thumbnail_url().map(str::to_string),
        business_information: api.business_information(),
        avg_rating: format!("{:.1}", api.rating()),
    };
    if api.is_product() {
        SearchResultDto::ApiProduct(result)
    } else {
        SearchResultDto::Api(result)
    }
}

pub fn map_documentation_to_result(doc: &Documentation, api: &Api) -> SearchResultDto {
    SearchResultDto::Document(DocumentSearchResult {
        id: doc.id.clone(),
        name: doc.name.clone(),
        transport_type: api.transports.clone(),
        doc_type: doc.doc_type.as_str().to_string(),
        summary: doc.summary.clone(),
        source_type: doc.source_type.as_str().to_string(),
        source_url: doc.source_url.clone(),
        other_doc_type: doc.other_type_name.clone(),
        visibility: doc.visibility.as_str().to_string(),
        api_name: api.id.name.clone(),
        api_version: api.id.version.clone(),
        api_provider: api.id.provider.clone(),
        api_uuid: api.uuid.clone(),
    })
}
