//! Structural conversion of resource filters between the legacy form (comma
//! joined tags, `id` inside the filter) and the v1beta1 `{id, filter}` params.
//!
//! A legacy filter with an `id` becomes a param carrying only the ID; its
//! other fields are dropped here and come back through restoration.

use conversion::{join_tags, split_tags, to_optional};

use crate::v1alpha6::types::{
    NetworkFilter, RouterFilter, SecurityGroupFilter, SecurityGroupParam, SubnetFilter, SubnetParam,
};
use crate::v1beta1 as hub;

fn neutron_tags(
    tags: &str,
    tags_any: &str,
    not_tags: &str,
    not_tags_any: &str,
) -> hub::FilterByNeutronTags {
    hub::FilterByNeutronTags {
        tags: split_tags(tags),
        tags_any: split_tags(tags_any),
        not_tags: split_tags(not_tags),
        not_tags_any: split_tags(not_tags_any),
    }
}

pub(crate) fn network_filter_up(filter: &NetworkFilter) -> Option<hub::NetworkParam> {
    if *filter == NetworkFilter::default() {
        return None;
    }
    if !filter.id.is_empty() {
        return Some(hub::NetworkParam {
            id: Some(filter.id.clone()),
            filter: None,
        });
    }
    Some(hub::NetworkParam {
        id: None,
        filter: Some(hub::NetworkFilter {
            name: filter.name.clone(),
            description: filter.description.clone(),
            project_id: filter.project_id.clone(),
            tags: neutron_tags(
                &filter.tags,
                &filter.tags_any,
                &filter.not_tags,
                &filter.not_tags_any,
            ),
        }),
    })
}

pub(crate) fn network_param_down(param: &hub::NetworkParam) -> NetworkFilter {
    let mut out = NetworkFilter {
        id: param.id.clone().unwrap_or_default(),
        ..Default::default()
    };
    if let Some(filter) = &param.filter {
        out.name = filter.name.clone();
        out.description = filter.description.clone();
        out.project_id = filter.project_id.clone();
        out.tags = join_tags(&filter.tags.tags);
        out.tags_any = join_tags(&filter.tags.tags_any);
        out.not_tags = join_tags(&filter.tags.not_tags);
        out.not_tags_any = join_tags(&filter.tags.not_tags_any);
    }
    out
}

pub(crate) fn subnet_filter_up(filter: &SubnetFilter) -> Option<hub::SubnetParam> {
    if *filter == SubnetFilter::default() {
        return None;
    }
    if !filter.id.is_empty() {
        return Some(hub::SubnetParam {
            id: Some(filter.id.clone()),
            filter: None,
        });
    }
    Some(hub::SubnetParam {
        id: None,
        filter: Some(hub::SubnetFilter {
            name: filter.name.clone(),
            description: filter.description.clone(),
            project_id: filter.project_id.clone(),
            ip_version: to_optional(filter.ip_version),
            gateway_ip: filter.gateway_ip.clone(),
            cidr: filter.cidr.clone(),
            ipv6_address_mode: filter.ipv6_address_mode.clone(),
            ipv6_ra_mode: filter.ipv6_ra_mode.clone(),
            tags: neutron_tags(
                &filter.tags,
                &filter.tags_any,
                &filter.not_tags,
                &filter.not_tags_any,
            ),
        }),
    })
}

pub(crate) fn subnet_param_down(param: &hub::SubnetParam) -> SubnetFilter {
    let mut out = SubnetFilter {
        id: param.id.clone().unwrap_or_default(),
        ..Default::default()
    };
    if let Some(filter) = &param.filter {
        out.name = filter.name.clone();
        out.description = filter.description.clone();
        out.project_id = filter.project_id.clone();
        out.ip_version = filter.ip_version.unwrap_or_default();
        out.gateway_ip = filter.gateway_ip.clone();
        out.cidr = filter.cidr.clone();
        out.ipv6_address_mode = filter.ipv6_address_mode.clone();
        out.ipv6_ra_mode = filter.ipv6_ra_mode.clone();
        out.tags = join_tags(&filter.tags.tags);
        out.tags_any = join_tags(&filter.tags.tags_any);
        out.not_tags = join_tags(&filter.tags.not_tags);
        out.not_tags_any = join_tags(&filter.tags.not_tags_any);
    }
    out
}

/// Legacy `{uuid, filter}` subnet reference
pub(crate) fn subnet_ref_up(param: &SubnetParam) -> hub::SubnetParam {
    if !param.uuid.is_empty() {
        return hub::SubnetParam {
            id: Some(param.uuid.clone()),
            filter: None,
        };
    }
    subnet_filter_up(&param.filter).unwrap_or_default()
}

pub(crate) fn subnet_ref_down(param: &hub::SubnetParam) -> SubnetParam {
    let mut filter = subnet_param_down(param);
    SubnetParam {
        uuid: std::mem::take(&mut filter.id),
        filter,
    }
}

pub(crate) fn router_filter_up(filter: &RouterFilter) -> hub::RouterParam {
    if !filter.id.is_empty() {
        return hub::RouterParam {
            id: Some(filter.id.clone()),
            filter: None,
        };
    }
    hub::RouterParam {
        id: None,
        filter: Some(hub::RouterFilter {
            name: filter.name.clone(),
            description: filter.description.clone(),
            project_id: filter.project_id.clone(),
            tags: neutron_tags(
                &filter.tags,
                &filter.tags_any,
                &filter.not_tags,
                &filter.not_tags_any,
            ),
        }),
    }
}

pub(crate) fn router_param_down(param: &hub::RouterParam) -> RouterFilter {
    let mut out = RouterFilter {
        id: param.id.clone().unwrap_or_default(),
        ..Default::default()
    };
    if let Some(filter) = &param.filter {
        out.name = filter.name.clone();
        out.description = filter.description.clone();
        out.project_id = filter.project_id.clone();
        out.tags = join_tags(&filter.tags.tags);
        out.tags_any = join_tags(&filter.tags.tags_any);
        out.not_tags = join_tags(&filter.tags.not_tags);
        out.not_tags_any = join_tags(&filter.tags.not_tags_any);
    }
    out
}

fn security_group_filter_up(filter: &SecurityGroupFilter) -> hub::SecurityGroupParam {
    if !filter.id.is_empty() {
        return hub::SecurityGroupParam {
            id: Some(filter.id.clone()),
            filter: None,
        };
    }
    hub::SecurityGroupParam {
        id: None,
        filter: Some(hub::SecurityGroupFilter {
            name: filter.name.clone(),
            description: filter.description.clone(),
            project_id: filter.project_id.clone(),
            tags: neutron_tags(
                &filter.tags,
                &filter.tags_any,
                &filter.not_tags,
                &filter.not_tags_any,
            ),
        }),
    }
}

/// A legacy security group reference keeps whichever identifier it used:
/// UUID first, then name, then the filter.
pub(crate) fn security_group_param_up(param: &SecurityGroupParam) -> hub::SecurityGroupParam {
    if !param.uuid.is_empty() {
        return hub::SecurityGroupParam {
            id: Some(param.uuid.clone()),
            filter: None,
        };
    }
    if !param.name.is_empty() {
        return hub::SecurityGroupParam {
            id: None,
            filter: Some(hub::SecurityGroupFilter {
                name: param.name.clone(),
                ..Default::default()
            }),
        };
    }
    security_group_filter_up(&param.filter)
}

pub(crate) fn security_group_param_down(param: &hub::SecurityGroupParam) -> SecurityGroupParam {
    let mut out = SecurityGroupParam {
        uuid: param.id.clone().unwrap_or_default(),
        ..Default::default()
    };
    if let Some(filter) = &param.filter {
        out.filter = SecurityGroupFilter {
            id: String::new(),
            name: filter.name.clone(),
            description: filter.description.clone(),
            project_id: filter.project_id.clone(),
            tags: join_tags(&filter.tags.tags),
            tags_any: join_tags(&filter.tags.tags_any),
            not_tags: join_tags(&filter.tags.not_tags),
            not_tags_any: join_tags(&filter.tags.not_tags_any),
        };
    }
    out
}
